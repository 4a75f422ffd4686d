//! Test helpers
//!
//! The bundled lexer only fragments tokens the way its rules dictate. Editors in the wild split
//! partial input in other ways, so tests describe lines fragment by fragment with a
//! [`ScriptedTokenizer`] instead. It honours the same contract as
//! [`Document`](crate::tokens::Document) and counts the lookups it serves.

use crate::tokens::document::token_covering;
use crate::tokens::position::Position;
use crate::tokens::reconcile::Tokenizer;
use crate::tokens::token::{Token, TokenKind};
use std::cell::Cell;

/// One fragment of a scripted line: its text and kind
pub type Fragment<'a> = (&'a str, Option<TokenKind>);

pub fn fragment(text: &str, kind: Option<TokenKind>) -> Fragment<'_> {
    (text, kind)
}

/// A whitespace fragment
pub fn ws(text: &str) -> Fragment<'_> {
    (text, Some(TokenKind::Whitespace))
}

/// Tokenizer replaying pre-split lines
#[derive(Debug, Default)]
pub struct ScriptedTokenizer {
    lines: Vec<Vec<Token>>,
    queries: Cell<usize>,
}

impl ScriptedTokenizer {
    /// A tokenizer holding a single line made of `fragments`
    pub fn line(fragments: &[Fragment<'_>]) -> Self {
        Self::default().with_line(fragments)
    }

    /// Append another line
    pub fn with_line(mut self, fragments: &[Fragment<'_>]) -> Self {
        let mut column = 0;
        let tokens = fragments
            .iter()
            .map(|(text, kind)| {
                let start = column;
                column += text.chars().count();
                Token::new(start, column, *kind, *text)
            })
            .collect();
        self.lines.push(tokens);
        self
    }

    /// The text of a line, reassembled from its fragments
    pub fn text(&self, line: usize) -> String {
        self.lines
            .get(line)
            .map(|tokens| tokens.iter().map(|token| token.text.as_str()).collect())
            .unwrap_or_default()
    }

    /// How many lookups have been served so far
    pub fn queries(&self) -> usize {
        self.queries.get()
    }
}

impl Tokenizer for ScriptedTokenizer {
    fn token_at(&self, position: Position) -> Option<Token> {
        self.queries.set(self.queries.get() + 1);
        let tokens = self.lines.get(position.line)?;
        token_covering(tokens, position.column).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_columns() {
        let tokenizer = ScriptedTokenizer::line(&[
            fragment("http:", Some(TokenKind::PrefixedName)),
            fragment("//x", Some(TokenKind::Word)),
            ws(" "),
        ]);

        assert_eq!(tokenizer.text(0), "http://x ");
        assert_eq!(
            tokenizer.token_at(Position::new(0, 6)),
            Some(Token::new(5, 8, Some(TokenKind::Word), "//x"))
        );
        assert_eq!(tokenizer.token_at(Position::new(0, 0)), None);
        assert_eq!(tokenizer.queries(), 2);
    }
}
