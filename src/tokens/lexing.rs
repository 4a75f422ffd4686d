//! Line lexer for SPARQL-ish query text
//!
//! This is the tokenizer bundled with the crate. It works one line at a time with a vanilla logos
//! lexer and makes no attempt to recover from partial input: a half-typed IRI such as
//! `<http://example.org/x` comes out as `<`, `http:`, `/`, `/`, `example`, `.`, `org`, `/`, `x`,
//! which is exactly the fragmentation the [reconciler](crate::tokens::reconcile) repairs.
//!
//! Output tokens are gap free and their columns are character indices into the line. Characters
//! no rule matches become one uncategorized token each.
//!
//! No rule ever has to give up a longer attempt for a shorter match: forms with an optional tail
//! (IRI references after `<`, fractional parts of numbers) are finished off in callbacks.

use crate::tokens::token::{Token, TokenKind};
use logos::{Lexer, Logos};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// What an opening `<` turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Angle {
    /// A closed IRI reference such as `<http://example.org/>`
    Iri,
    /// A bare `<`
    Less,
}

/// Raw tokens produced by logos
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("<", iri_or_less)]
    Angle(Angle),

    // Either part may be empty, so a lone ':' is a prefixed name too
    #[regex(r"([A-Za-z][A-Za-z0-9_-]*)?:[A-Za-z0-9_:%-]*")]
    PrefixedName,

    #[regex(r"[?$][A-Za-z0-9_]+")]
    Variable,

    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*")]
    Word,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    QuotedString,

    // Runs to the end of the line, a dangling backslash included
    #[regex(r#""([^"\\\n]|\\.)*\\?"#)]
    #[regex(r"'([^'\\\n]|\\.)*\\?")]
    UnterminatedString,

    #[regex(r"[0-9]+", decimal)]
    Number,

    #[regex(r"@[a-zA-Z][a-zA-Z0-9-]*")]
    LangTag,

    #[regex(r"#[^\n]*")]
    Comment,

    #[token("{")]
    #[token("}")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token(".")]
    #[token(",")]
    #[token(";")]
    Punctuation,

    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    #[token("=")]
    #[token("!=")]
    #[token("!")]
    #[token("&&")]
    #[token("||")]
    #[token("|")]
    #[token("*")]
    #[token("+")]
    #[token("-")]
    #[token("/")]
    #[token("^")]
    #[token("^^")]
    #[token("?")]
    Operator,
}

/// Extend a `<` over an IRI reference that closes on this line
fn iri_or_less(lex: &mut Lexer<RawToken>) -> Angle {
    for (offset, ch) in lex.remainder().char_indices() {
        match ch {
            '>' => {
                lex.bump(offset + 1);
                return Angle::Iri;
            }
            '<' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => break,
            ch if ch <= ' ' => break,
            _ => {}
        }
    }
    Angle::Less
}

/// Take a fractional part, if digits follow the dot
fn decimal(lex: &mut Lexer<RawToken>) {
    let rest = lex.remainder().as_bytes();
    if rest.first() == Some(&b'.') {
        let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            lex.bump(1 + digits);
        }
    }
}

// `a` is left out: it only abbreviates rdf:type in predicate position
static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ASK", "ASC", "BASE", "BIND", "BY", "CONSTRUCT", "DESC", "DESCRIBE", "DISTINCT", "EXISTS",
        "FILTER", "FROM", "GRAPH", "GROUP", "HAVING", "IN", "LIMIT", "MINUS", "NAMED", "NOT",
        "OFFSET", "OPTIONAL", "ORDER", "PREFIX", "REDUCED", "SELECT", "SERVICE", "UNION", "VALUES",
        "WHERE", "INSERT", "DELETE", "DATA", "WITH", "USING", "LOAD", "CLEAR", "DROP", "CREATE",
        "ADD", "MOVE", "COPY", "SILENT", "DEFAULT", "ALL", "AS", "UNDEF", "TRUE", "FALSE",
    ]
    .into_iter()
    .collect()
});

/// Whether `word` is a query keyword (case-insensitive)
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

impl RawToken {
    /// Classify a raw token, looking at its text where the raw kind alone is not enough
    pub fn kind(&self, slice: &str) -> TokenKind {
        match self {
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::Angle(Angle::Iri) => TokenKind::Iri,
            RawToken::Angle(Angle::Less) => TokenKind::Operator,
            RawToken::PrefixedName => TokenKind::PrefixedName,
            RawToken::Variable => TokenKind::Variable,
            RawToken::Word if is_keyword(slice) => TokenKind::Keyword,
            RawToken::Word => TokenKind::Word,
            RawToken::QuotedString | RawToken::UnterminatedString => TokenKind::String,
            RawToken::Number => TokenKind::Number,
            RawToken::LangTag => TokenKind::LangTag,
            RawToken::Comment => TokenKind::Comment,
            RawToken::Punctuation => TokenKind::Punctuation,
            RawToken::Operator => TokenKind::Operator,
        }
    }
}

/// Tokenize a single line (without its line terminator)
pub fn tokenize_line(line: &str) -> Vec<Token> {
    let mut lexer = RawToken::lexer(line);
    let mut out = LineTokens::default();
    // Byte offset where a run of unmatched input started
    let mut unmatched: Option<usize> = None;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(raw) => {
                if let Some(from) = unmatched.take() {
                    out.push_unmatched(&line[from..span.start]);
                }
                let slice = lexer.slice();
                out.push(Some(raw.kind(slice)), slice);
            }
            Err(()) => {
                let from = unmatched.unwrap_or(span.start);
                if line.is_char_boundary(span.end) {
                    out.push_unmatched(&line[from..span.end]);
                    unmatched = None;
                } else {
                    unmatched = Some(from);
                }
            }
        }
    }
    if let Some(from) = unmatched {
        out.push_unmatched(&line[from..]);
    }

    out.tokens
}

#[derive(Default)]
struct LineTokens {
    tokens: Vec<Token>,
    column: usize,
}

impl LineTokens {
    fn push(&mut self, kind: Option<TokenKind>, text: &str) {
        let start = self.column;
        self.column += text.chars().count();
        self.tokens.push(Token::new(start, self.column, kind, text));
    }

    fn push_unmatched(&mut self, text: &str) {
        for ch in text.chars() {
            let mut buf = [0u8; 4];
            self.push(None, ch.encode_utf8(&mut buf));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(Option<TokenKind>, String)> {
        tokenize_line(line)
            .into_iter()
            .map(|token| (token.kind, token.text))
            .collect()
    }

    #[test]
    fn test_tokenizes() {
        let tokens = tokenize_line("SELECT ?s");
        assert_eq!(
            tokens,
            vec![
                Token::new(0, 6, Some(TokenKind::Keyword), "SELECT"),
                Token::new(6, 7, Some(TokenKind::Whitespace), " "),
                Token::new(7, 9, Some(TokenKind::Variable), "?s"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize_line(""), vec![]);
    }

    #[test]
    fn test_complete_iri_is_one_token() {
        assert_eq!(
            kinds("<http://example.org/x>"),
            vec![(Some(TokenKind::Iri), "<http://example.org/x>".to_string())]
        );
    }

    #[test]
    fn test_partial_iri_fragments() {
        let texts: Vec<String> = tokenize_line("<http://example.org/x")
            .into_iter()
            .map(|token| token.text)
            .collect();
        assert_eq!(
            texts,
            vec!["<", "http:", "/", "/", "example", ".", "org", "/", "x"]
        );
        assert!(tokenize_line("<http://example.org/x")
            .iter()
            .all(|token| token.is_significant()));
    }

    #[test]
    fn test_unclosed_iri_is_an_operator() {
        assert_eq!(
            kinds("<http:"),
            vec![
                (Some(TokenKind::Operator), "<".to_string()),
                (Some(TokenKind::PrefixedName), "http:".to_string()),
            ]
        );
        assert_eq!(
            kinds("<a b>"),
            vec![
                (Some(TokenKind::Operator), "<".to_string()),
                (Some(TokenKind::Word), "a".to_string()),
                (Some(TokenKind::Whitespace), " ".to_string()),
                (Some(TokenKind::Word), "b".to_string()),
                (Some(TokenKind::Operator), ">".to_string()),
            ]
        );
        assert_eq!(kinds("<=")[0], (Some(TokenKind::Operator), "<=".to_string()));
    }

    #[test]
    fn test_partial_forms_keep_their_prefix() {
        assert_eq!(
            kinds("12."),
            vec![
                (Some(TokenKind::Number), "12".to_string()),
                (Some(TokenKind::Punctuation), ".".to_string()),
            ]
        );
        assert_eq!(
            kinds("ex-"),
            vec![(Some(TokenKind::Word), "ex-".to_string())]
        );
        assert_eq!(
            kinds("@en- "),
            vec![
                (Some(TokenKind::LangTag), "@en-".to_string()),
                (Some(TokenKind::Whitespace), " ".to_string()),
            ]
        );
        assert_eq!(
            kinds(r#""a\"#),
            vec![(Some(TokenKind::String), r#""a\"#.to_string())]
        );
    }

    #[test]
    fn test_a_is_a_word() {
        assert!(!is_keyword("a"));
        assert_eq!(
            kinds("?s a ex:T"),
            vec![
                (Some(TokenKind::Variable), "?s".to_string()),
                (Some(TokenKind::Whitespace), " ".to_string()),
                (Some(TokenKind::Word), "a".to_string()),
                (Some(TokenKind::Whitespace), " ".to_string()),
                (Some(TokenKind::PrefixedName), "ex:T".to_string()),
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(kinds("select")[0].0, Some(TokenKind::Keyword));
        assert_eq!(kinds("Where")[0].0, Some(TokenKind::Keyword));
        assert_eq!(kinds("label")[0].0, Some(TokenKind::Word));
    }

    #[test]
    fn test_strings_numbers_and_tags() {
        assert_eq!(
            kinds(r#""chat"@en-GB 4.5"#),
            vec![
                (Some(TokenKind::String), "\"chat\"".to_string()),
                (Some(TokenKind::LangTag), "@en-GB".to_string()),
                (Some(TokenKind::Whitespace), " ".to_string()),
                (Some(TokenKind::Number), "4.5".to_string()),
            ]
        );
        assert_eq!(
            kinds("'open ended"),
            vec![(Some(TokenKind::String), "'open ended".to_string())]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("?x # note: <not an iri"),
            vec![
                (Some(TokenKind::Variable), "?x".to_string()),
                (Some(TokenKind::Whitespace), " ".to_string()),
                (Some(TokenKind::Comment), "# note: <not an iri".to_string()),
            ]
        );
    }

    #[test]
    fn test_unmatched_characters_are_uncategorized() {
        let tokens = tokenize_line("a~é");
        assert_eq!(
            tokens,
            vec![
                Token::new(0, 1, Some(TokenKind::Word), "a"),
                Token::new(1, 2, None, "~"),
                Token::new(2, 3, None, "é"),
            ]
        );
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens = tokenize_line("\"né\" ?x");
        assert_eq!(tokens[0], Token::new(0, 4, Some(TokenKind::String), "\"né\""));
        assert_eq!(tokens[2], Token::new(5, 7, Some(TokenKind::Variable), "?x"));
    }

    #[test]
    fn test_tokens_are_gap_free() {
        let line = "PREFIX ex: <http://ex.org/> SELECT * { ?s ex:p \"v\" . }";
        let tokens = tokenize_line(line);
        let mut column = 0;
        for token in &tokens {
            assert_eq!(token.start, column);
            assert_eq!(token.text.chars().count(), token.len());
            column = token.end;
        }
        assert_eq!(column, line.chars().count());
    }
}
