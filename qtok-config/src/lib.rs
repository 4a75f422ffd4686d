//! Configuration for qtok: lookup defaults, CLI output and logging.
//!
//! `defaults/qtok.default.toml` is compiled in and always forms the bottom layer. The
//! `[lookup]` table maps onto [`ReconcileOptions`]; `[output]` picks the CLI's query and
//! format; `[logging]` sets the stderr log level.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use qtok::tokens::ReconcileOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/qtok.default.toml");

/// Top-level configuration consumed by qtok applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QtokConfig {
    pub lookup: LookupConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Defaults for the token lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    pub next_default_column: usize,
}

impl LookupConfig {
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            next_default_column: self.next_default_column,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub query: QueryKind,
    pub format: OutputFormat,
}

/// What to look up at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    /// The reconciled token under the position
    Complete,
    /// The previous non-whitespace token before the reconciled token
    Previous,
    /// The next non-whitespace token from the position's column
    Next,
    /// Every raw token of the position's line
    Tokens,
}

impl QueryKind {
    pub const ALL: [QueryKind; 4] = [
        QueryKind::Complete,
        QueryKind::Previous,
        QueryKind::Next,
        QueryKind::Tokens,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QueryKind::Complete => "complete",
            QueryKind::Previous => "previous",
            QueryKind::Next => "next",
            QueryKind::Tokens => "tokens",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QueryKind::Complete => "The complete logical token at the position",
            QueryKind::Previous => "The previous non-whitespace token before the complete token",
            QueryKind::Next => "The next non-whitespace token from the position's column",
            QueryKind::Tokens => "All raw tokens of the position's line",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Layers a query file's lookup and output settings over `qtok.default.toml`.
///
/// Later layers win: a `--config` file beats the defaults, and `set_override` (the CLI's
/// `--query`, `--format` and `--verbose`) beats both.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml).required(true));
        self
    }

    /// Layer a TOML file if it exists
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml).required(false));
        self
    }

    /// Set one dotted key, e.g. `output.format`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<QtokConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    /// Only the `[lookup]` table, as options for a
    /// [`Reconciler`](qtok::tokens::Reconciler)
    ///
    /// Editors embedding the library need nothing else, so `[output]` and `[logging]` are not
    /// validated here.
    pub fn reconcile_options(self) -> Result<ReconcileOptions, ConfigError> {
        let lookup: LookupConfig = self.builder.build()?.get("lookup")?;
        Ok(lookup.reconcile_options())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QtokConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.lookup.next_default_column, 1);
        assert_eq!(config.output.query, QueryKind::Complete);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(
            config.lookup.reconcile_options(),
            ReconcileOptions::default()
        );
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("lookup.next_default_column", 4i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.lookup.reconcile_options().next_default_column, 4);
    }

    #[test]
    fn rejects_unknown_values() {
        let result = Loader::new()
            .set_override("output.query", "everything")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn layers_user_files() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[logging]\nlevel = \"debug\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.output.query, QueryKind::Complete);
    }

    #[test]
    fn optional_files_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/qtok.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.logging.level, LogLevel::Warn);

        let result = Loader::new().with_file("/nonexistent/qtok.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn reconcile_options_from_lookup_table() {
        let options = Loader::new().reconcile_options().expect("defaults to load");
        assert_eq!(options, ReconcileOptions::default());

        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[lookup]\nnext_default_column = 5").expect("write config");
        let options = Loader::new()
            .with_file(file.path())
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .reconcile_options()
            .expect("lookup table to load");
        assert_eq!(options.next_default_column, 5);
    }

    #[test]
    fn query_names_match_config_values() {
        for query in QueryKind::ALL {
            let config = Loader::new()
                .set_override("output.query", query.name())
                .expect("override to apply")
                .build()
                .expect("config to build");
            assert_eq!(config.output.query, query);
        }
    }
}
