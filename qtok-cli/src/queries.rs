//! CLI-specific queries
//!
//! Each query looks something up at a target in a document and renders it in one of the output
//! formats (e.g. `complete` as `json`).

use qtok::tokens::{Document, Position, ReconcileOptions, Reconciler, Token};
use qtok_config::{OutputFormat, QueryKind};

/// Where a query looks: a line and, optionally, a column on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub line: usize,
    pub column: Option<usize>,
}

impl Target {
    /// Parse `line:column` or a bare `line`
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.contains(':') {
            let position: Position = s.parse().map_err(|e| format!("{}", e))?;
            return Ok(Self {
                line: position.line,
                column: Some(position.column),
            });
        }
        let line = s
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("Invalid position format: invalid line '{}'", s))?;
        Ok(Self { line, column: None })
    }

    fn position(&self, query: QueryKind) -> Result<Position, String> {
        self.column
            .map(|column| Position::new(self.line, column))
            .ok_or_else(|| format!("Query '{}' needs a line:column position", query.name()))
    }
}

/// Run a query against a document and render the result
pub fn execute_query(
    doc: &Document,
    target: Target,
    query: QueryKind,
    format: OutputFormat,
    options: ReconcileOptions,
) -> Result<String, String> {
    doc.check_position(Position::new(target.line, target.column.unwrap_or(0)))
        .map_err(|e| e.to_string())?;
    let reconciler = Reconciler::new(doc).with_options(options);
    tracing::debug!(query = query.name(), line = target.line, column = ?target.column, "running query");

    match query {
        QueryKind::Complete => {
            let position = target.position(query)?;
            render_token(reconciler.complete_token(position, None).as_ref(), format)
        }
        QueryKind::Previous => {
            let position = target.position(query)?;
            let previous = reconciler
                .complete_token(position, None)
                .and_then(|token| reconciler.previous_non_whitespace(position.line, &token));
            render_token(previous.as_ref(), format)
        }
        QueryKind::Next => {
            let next = reconciler.next_non_whitespace(target.line, target.column);
            render_token(next.as_ref(), format)
        }
        QueryKind::Tokens => {
            let tokens = doc.tokens(target.line).unwrap_or_default();
            render_tokens(tokens, format)
        }
    }
}

fn render_token(token: Option<&Token>, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(token
            .map(|token| token.to_string())
            .unwrap_or_else(|| "<none>".to_string())),
        OutputFormat::Json => serde_json::to_string_pretty(&token)
            .map_err(|e| format!("JSON serialization failed: {}", e)),
    }
}

fn render_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| format!("JSON serialization failed: {}", e)),
    }
}
