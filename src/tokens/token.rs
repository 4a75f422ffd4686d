//! The token value shared by tokenizers and the reconciler
//!
//! A [`Token`] occupies the characters `start..end` of one line and carries the literal text of
//! that range. Tokens are plain values: the reconciler builds new ones instead of editing those a
//! tokenizer hands out.

use serde::Serialize;
use std::fmt;

/// Lexical categories a tokenizer may assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Keyword,
    Variable,
    Iri,
    PrefixedName,
    String,
    Number,
    LangTag,
    Punctuation,
    Operator,
    Comment,
    Word,
    #[serde(rename = "ws")]
    Whitespace,
}

impl TokenKind {
    /// Style name of the kind, as editors usually spell it
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Variable => "variable",
            TokenKind::Iri => "iri",
            TokenKind::PrefixedName => "prefixed-name",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::LangTag => "lang-tag",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Operator => "operator",
            TokenKind::Comment => "comment",
            TokenKind::Word => "word",
            TokenKind::Whitespace => "ws",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical unit of one line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    /// First character index (inclusive)
    pub start: usize,
    /// One past the last character index
    pub end: usize,
    /// `None` for uncategorized content
    pub kind: Option<TokenKind>,
    pub text: String,
}

impl Token {
    pub fn new(start: usize, end: usize, kind: Option<TokenKind>, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind,
            text: text.into(),
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == Some(TokenKind::Whitespace)
    }

    /// Categorized and not whitespace: the tokens that make up logical tokens
    pub fn is_significant(&self) -> bool {
        matches!(self.kind, Some(kind) if kind != TokenKind::Whitespace)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the cursor boundary `column` falls inside this token
    pub fn covers(&self, column: usize) -> bool {
        self.start < column && column <= self.end
    }

    /// Extend to the left with a fragment that ends where this token starts
    pub(crate) fn prepend(self, fragment: &Token) -> Self {
        Self {
            start: fragment.start,
            text: format!("{}{}", fragment.text, self.text),
            ..self
        }
    }

    /// Extend to the right with a fragment that starts where this token ends
    pub(crate) fn append(self, fragment: &Token) -> Self {
        Self {
            end: fragment.end,
            text: format!("{}{}", self.text, fragment.text),
            ..self
        }
    }

    /// Drop the first character, keeping the span in step
    pub(crate) fn trim_first(self) -> Self {
        if self.is_empty() {
            return self;
        }
        let text = self.text.chars().skip(1).collect();
        Self {
            start: self.start + 1,
            text,
            ..self
        }
    }

    /// Drop the last character, keeping the span in step
    pub(crate) fn trim_last(self) -> Self {
        if self.is_empty() {
            return self;
        }
        let mut text = self.text;
        text.pop();
        Self {
            end: self.end - 1,
            text,
            ..self
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind.map(|kind| kind.as_str()).unwrap_or("none");
        write!(f, "{}..{} {} {:?}", self.start, self.end, kind, self.text)
    }
}
