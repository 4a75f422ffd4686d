//! Reconciliation of fragmented tokens
//!
//!     While a query is being typed it is usually invalid, and the tokens an incremental tokenizer
//!     emits for it do not line up with what the user is writing. `http://bla` may come out as
//!     `http:`, `/`, `/` and `bla`. Autocompletion wants the whole `http://bla`, so the
//!     [`Reconciler`] takes the token under the cursor and grows it over its neighbours until it
//!     reaches a real boundary.
//!
//! Boundaries
//!
//!     A neighbour is merged when both it and the token being grown are categorized and not
//!     whitespace. Merging ignores the kinds otherwise: an operator next to a word is merged just
//!     like two words are. Growth stops at whitespace, at uncategorized tokens and at the line
//!     edges. Reconciliation never leaves the cursor's line.
//!
//! Whitespace seeds
//!
//!     When the cursor sits in a whitespace run, the run itself is the result, minus one character
//!     on every side that touches a non-whitespace token. An insertion that replaces the result
//!     therefore keeps one separator on each side instead of gluing onto its neighbours. Sides
//!     touching a line edge keep their full width, and a result that is already trimmed is not
//!     trimmed again when fed back in as a seed.
//!
//! Both expansions are loops over an accumulated token value. Every merge strictly widens the span,
//! so they finish within the length of the line regardless of how many fragments it holds.

use crate::tokens::position::Position;
use crate::tokens::token::Token;

/// Source of raw tokens
///
/// Contract:
/// - returns the token covering the cursor boundary `position.column`, meaning the token with
///   `start < column <= end`;
/// - for a column past the last token of the line, returns that last token;
/// - returns `None` at column 0, on empty lines and for lines that do not exist.
pub trait Tokenizer {
    fn token_at(&self, position: Position) -> Option<Token>;
}

/// An editor knows where its cursor is
pub trait Editor: Tokenizer {
    fn cursor(&self) -> Position;
}

/// Knobs for the lookups that take defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Column [`Reconciler::next_non_whitespace`] starts from when none is given
    pub next_default_column: usize,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            next_default_column: 1,
        }
    }
}

/// Rebuilds logical tokens from the raw tokens of a [`Tokenizer`]
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'t, T: ?Sized> {
    tokenizer: &'t T,
    options: ReconcileOptions,
}

impl<'t, T: Tokenizer + ?Sized> Reconciler<'t, T> {
    pub fn new(tokenizer: &'t T) -> Self {
        Self {
            tokenizer,
            options: ReconcileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    /// The complete logical token containing `cursor`
    ///
    /// `seed` is the raw token to grow; without one the tokenizer is asked for the token at the
    /// cursor. A seed must come from the cursor's line. Returns `None` only when there is no seed
    /// and the tokenizer has no token at the cursor (line start, empty or missing line).
    pub fn complete_token(&self, cursor: Position, seed: Option<Token>) -> Option<Token> {
        let _span = tracing::trace_span!("complete_token", %cursor).entered();

        let seed = match seed {
            Some(seed) => seed,
            None => self.tokenizer.token_at(cursor)?,
        };
        // Left first: the right side continues from wherever the left side left the token
        let token = self.expand_to_start(cursor.line, seed);
        Some(self.expand_to_end(cursor.line, token))
    }

    fn expand_to_start(&self, line: usize, mut token: Token) -> Token {
        loop {
            let previous = self.tokenizer.token_at(Position::new(line, token.start));
            match previous {
                Some(previous)
                    if previous.is_significant()
                        && token.is_significant()
                        && previous.start < token.start =>
                {
                    tracing::trace!(from = previous.start, text = %previous.text, "merge left");
                    token = token.prepend(&previous);
                }
                Some(previous) if token.is_whitespace() && !previous.is_whitespace() => {
                    tracing::trace!(start = token.start, "keep left separator");
                    return token.trim_first();
                }
                _ => {
                    tracing::trace!(start = token.start, "left boundary");
                    return token;
                }
            }
        }
    }

    fn expand_to_end(&self, line: usize, mut token: Token) -> Token {
        loop {
            let next = self.tokenizer.token_at(Position::new(line, token.end + 1));
            // A token that does not end further right is the tokenizer clamping to the line's
            // last token: there is nothing after us.
            match next {
                Some(next)
                    if next.end > token.end && next.is_significant() && token.is_significant() =>
                {
                    tracing::trace!(to = next.end, text = %next.text, "merge right");
                    token = token.append(&next);
                }
                Some(next)
                    if next.end > token.end && token.is_whitespace() && !next.is_whitespace() =>
                {
                    tracing::trace!(end = token.end, "keep right separator");
                    return token.trim_last();
                }
                _ => {
                    tracing::trace!(end = token.end, "right boundary");
                    return token;
                }
            }
        }
    }

    /// The closest raw token before `token` on `line` that is not whitespace
    ///
    /// Fragments are not merged. `None` when only whitespace separates `token` from the start of
    /// the line.
    pub fn previous_non_whitespace(&self, line: usize, token: &Token) -> Option<Token> {
        let mut column = token.start;
        loop {
            let previous = self.tokenizer.token_at(Position::new(line, column))?;
            if !previous.is_whitespace() {
                return Some(previous);
            }
            if previous.start >= column {
                return None;
            }
            column = previous.start;
        }
    }

    /// The first raw token at or after `column` on `line` that is not whitespace
    ///
    /// `column` defaults to [`ReconcileOptions::next_default_column`]. Fragments are not merged.
    /// `None` once the lookup runs past the end of the line's content.
    pub fn next_non_whitespace(&self, line: usize, column: Option<usize>) -> Option<Token> {
        let mut column = column.unwrap_or(self.options.next_default_column);
        loop {
            let token = self.tokenizer.token_at(Position::new(line, column))?;
            if token.end < column {
                return None;
            }
            if !token.is_whitespace() {
                return Some(token);
            }
            column = token.end + 1;
        }
    }
}

/// [`Reconciler::complete_token`] at the editor's own cursor
pub fn complete_token_at_cursor<E: Editor + ?Sized>(editor: &E, seed: Option<Token>) -> Option<Token> {
    Reconciler::new(editor).complete_token(editor.cursor(), seed)
}
