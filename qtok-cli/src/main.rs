//! Command-line interface for qtok
//! This binary inspects the tokens of a query file at a given position, the way an editor's
//! autocompletion would see them.
//!
//! Usage:
//!   qtok `<path>` --at `<line:column>` [--query `<query>`] [--format `<format>`] [--config `<file>`]
//!   qtok --list-queries                                  - List all available queries

mod logging;
mod queries;

use clap::{Arg, ArgAction, Command};
use qtok::tokens::Document;
use qtok_config::{Loader, QueryKind};
use queries::Target;

fn main() {
    let matches = Command::new("qtok")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting logical tokens in query files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the query file")
                .required_unless_present("list-queries")
                .index(1),
        )
        .arg(
            Arg::new("at")
                .long("at")
                .short('a')
                .help("Zero-based position, as line:column (or just line for 'next' and 'tokens')")
                .required_unless_present("list-queries"),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .short('q')
                .help("What to look up (default from configuration: complete)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text or json (default from configuration: text)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log reconciliation steps to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-queries")
                .long("list-queries")
                .help("List available queries")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-queries") {
        handle_list_queries_command();
        return;
    }

    let path = matches
        .get_one::<String>("path")
        .expect("path is required unless listing queries");
    let at = matches
        .get_one::<String>("at")
        .expect("position is required unless listing queries");

    let mut loader = Loader::new();
    if let Some(config) = matches.get_one::<String>("config") {
        loader = loader.with_file(config);
    }
    let overrides = [
        ("output.query", matches.get_one::<String>("query")),
        ("output.format", matches.get_one::<String>("format")),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            loader = loader.set_override(key, value.as_str()).unwrap_or_else(|e| {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            });
        }
    }
    if matches.get_flag("verbose") {
        loader = loader.set_override("logging.level", "trace").unwrap_or_else(|e| {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        });
    }
    let config = loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    logging::start(config.logging.level);
    handle_query_command(path, at, &config);
}

/// Handle a position query
fn handle_query_command(path: &str, at: &str, config: &qtok_config::QtokConfig) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    let target = Target::parse(at).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let doc = Document::new(&source);
    let output = queries::execute_query(
        &doc,
        target,
        config.output.query,
        config.output.format,
        config.lookup.reconcile_options(),
    )
    .unwrap_or_else(|e| {
        eprintln!("Query error: {}", e);
        std::process::exit(1);
    });

    println!("{}", output);
}

/// Handle the list-queries command
fn handle_list_queries_command() {
    println!("Available queries:\n");

    for query in QueryKind::ALL {
        println!("  {}", query.name());
        println!("    {}", query.description());
        println!();
    }
}
