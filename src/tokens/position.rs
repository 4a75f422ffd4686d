//! Cursor positions within a query document
//!
//! A [`Position`] names a line and a cursor boundary on that line. Both are zero based and the
//! column counts characters, not bytes.

use crate::tokens::error::PositionError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Represents a cursor position (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The same line at another column
    pub fn with_column(self, column: usize) -> Self {
        Self { column, ..self }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    /// Parse a `line:column` pair, e.g. `3:14`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, column) = s.trim().split_once(':').ok_or_else(|| {
            PositionError::InvalidFormat(format!("expected line:column, got '{}'", s))
        })?;
        let line = line
            .parse::<usize>()
            .map_err(|_| PositionError::InvalidFormat(format!("invalid line '{}'", line)))?;
        let column = column
            .parse::<usize>()
            .map_err(|_| PositionError::InvalidFormat(format!("invalid column '{}'", column)))?;
        Ok(Self::new(line, column))
    }
}
