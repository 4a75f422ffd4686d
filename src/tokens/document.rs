//! A query document: lexed lines plus an editor cursor
//!
//! [`Document`] is the bundled implementation of both collaborator contracts the reconciler
//! consumes. Lines are lexed once, up front, with the [line lexer](crate::tokens::lexing), and
//! token lookups are a binary search over the line's tokens.

use crate::tokens::error::PositionError;
use crate::tokens::lexing::tokenize_line;
use crate::tokens::position::Position;
use crate::tokens::reconcile::{Editor, Tokenizer};
use crate::tokens::token::Token;

#[derive(Debug, Clone)]
struct Line {
    text: String,
    tokens: Vec<Token>,
}

/// Lexed query text with a cursor
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    cursor: Position,
}

impl Document {
    /// Split `source` into lines (`\n` or `\r\n`) and lex each one
    pub fn new(source: &str) -> Self {
        let lines: Vec<Line> = source
            .split('\n')
            .map(|text| {
                let text = text.strip_suffix('\r').unwrap_or(text);
                Line {
                    tokens: tokenize_line(text),
                    text: text.to_string(),
                }
            })
            .collect();
        tracing::debug!(lines = lines.len(), "lexed document");

        Self {
            lines,
            cursor: Position::default(),
        }
    }

    pub fn with_cursor(mut self, cursor: Position) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of a line, without its terminator
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|line| line.text.as_str())
    }

    /// Raw tokens of a line, in order
    pub fn tokens(&self, line: usize) -> Option<&[Token]> {
        self.lines.get(line).map(|line| line.tokens.as_slice())
    }

    /// Make sure `position` names an existing line
    ///
    /// Columns are not checked: asking past the end of a line is a defined request that resolves
    /// to the line's last token.
    pub fn check_position(&self, position: Position) -> Result<(), PositionError> {
        if position.line < self.lines.len() {
            Ok(())
        } else {
            Err(PositionError::LineOutOfRange {
                line: position.line,
                line_count: self.lines.len(),
            })
        }
    }
}

impl Tokenizer for Document {
    fn token_at(&self, position: Position) -> Option<Token> {
        let tokens = self.tokens(position.line)?;
        token_covering(tokens, position.column).cloned()
    }
}

impl Editor for Document {
    fn cursor(&self) -> Position {
        self.cursor
    }
}

/// Find the token covering cursor boundary `column` in a gap-free, ordered token list
///
/// Column 0 and empty lines have no token. Columns past the last token clamp to it.
pub(crate) fn token_covering(tokens: &[Token], column: usize) -> Option<&Token> {
    if column == 0 {
        return None;
    }
    let index = tokens.partition_point(|token| token.end < column);
    tokens.get(index).or_else(|| tokens.last())
}
