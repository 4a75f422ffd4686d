//! Tokens, positions and the reconciliation of fragmented tokens.
//!
//! Columns
//!
//!     Every column in this crate is a cursor boundary measured in characters: column `c` sits
//!     between character `c - 1` and character `c` of its line. A token occupying characters
//!     `start..end` covers the boundaries `start < c <= end`, which is what the tokenizer contract
//!     relies on: asking for the token at `token.start` yields the token before it, and asking at
//!     `token.end + 1` yields the token after it.
//!
//! Kinds
//!
//!     A token's kind is optional. `None` marks content the tokenizer could not categorize, and
//!     reconciliation treats it as a hard boundary, the same as whitespace and the line edges.

pub mod document;
pub mod error;
pub mod lexing;
pub mod position;
pub mod reconcile;
pub mod testing;
pub mod token;

pub use document::Document;
pub use error::PositionError;
pub use position::Position;
pub use reconcile::{complete_token_at_cursor, Editor, ReconcileOptions, Reconciler, Tokenizer};
pub use token::{Token, TokenKind};
