//! # qtok
//!
//! Logical token reconciliation for query editors.
//!
//! An incremental tokenizer working on a half-typed query often splits what the user sees as one
//! token into several fragments: `<http://example.org/x` lexes as `<`, `http:`, `/`, `/`,
//! `example`, `.`, `org`, `/`, `x`. Autocompletion and context lookups need the whole thing.
//! This crate rebuilds the complete token around a cursor from whatever the tokenizer emitted.
//!
//! File Layout
//!
//! src/tokens
//!   ├── position     Line:column cursor boundaries
//!   ├── token        The token value and its kinds
//!   ├── lexing       A logos line lexer for SPARQL-ish query text
//!   ├── document     Lines + cursor, implementing the tokenizer and editor contracts
//!   ├── reconcile    The reconciler and the collaborator traits
//!   ├── error        Position errors
//!   └── testing      Scripted tokenizers for tests
//!
//! The reconciler only depends on the [`Tokenizer`](tokens::reconcile::Tokenizer) trait, so any
//! editor tokenizer honouring its contract can be plugged in instead of the bundled lexer.

pub mod tokens;
