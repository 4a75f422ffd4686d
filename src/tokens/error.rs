//! Error types for position handling

use std::fmt;

/// Errors that can occur while reading or validating a cursor position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Invalid position format string
    InvalidFormat(String),
    /// The position names a line the document does not have
    LineOutOfRange { line: usize, line_count: usize },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InvalidFormat(msg) => {
                write!(f, "Invalid position format: {}", msg)
            }
            PositionError::LineOutOfRange { line, line_count } => {
                write!(
                    f,
                    "Line {} is out of range (document has {} lines)",
                    line, line_count
                )
            }
        }
    }
}

impl std::error::Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PositionError::InvalidFormat("expected line:column".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid position format: expected line:column"
        );

        let err = PositionError::LineOutOfRange {
            line: 7,
            line_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Line 7 is out of range (document has 3 lines)"
        );
    }
}
