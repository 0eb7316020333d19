//! Book catalog query compiler CLI.
//!
//! Compiles catalog filters into Parse Server request parameters and shows
//! how search text is tokenized.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use catalog_query::{
    BookOrderingScheme, BookQueryCompiler, CompileOptions, CompilerConfig, Filter, QueryParams,
    load_known_tags,
};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "catalog-query", version)]
#[command(about = "Compile book catalog filters into Parse Server queries")]
struct Cli {
    #[command(flatten)]
    config: CompilerConfig,

    /// File of known tag literals, one per line.
    #[arg(long, env = "CATALOG_TAGS_FILE", global = true)]
    tags_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a filter (JSON, camelCase fields) into request parameters.
    Compile {
        /// Filter file; reads stdin when omitted or `-`.
        filter: Option<PathBuf>,

        /// Ordering scheme (default, none, newest-creations-first,
        /// last-uploaded-first, title-alphabetical).
        #[arg(long, default_value = "default")]
        ordering: BookOrderingScheme,

        /// Page size.
        #[arg(long)]
        limit: Option<u64>,

        /// Page offset.
        #[arg(long)]
        skip: Option<u64>,

        /// Initial sort keys, before the ordering scheme applies.
        #[arg(long)]
        order: Option<String>,

        /// Field projection.
        #[arg(long)]
        keys: Option<String>,

        /// Produce a count-only request.
        #[arg(long)]
        count: bool,

        /// Print `name=value` request pairs instead of JSON.
        #[arg(long)]
        pairs: bool,
    },

    /// Show how a search string splits into keywords and facets.
    Split {
        /// The search text.
        search: String,
    },
}

/// Initializes logging to stderr so stdout carries only results.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("catalog_query={},catalog_cli={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Reads a filter from a file, or stdin for `None` and `-`.
fn read_filter(path: Option<&Path>) -> anyhow::Result<Filter> {
    let json = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read filter from '{}'", path.display()))?,
        _ => io::read_to_string(io::stdin()).context("failed to read filter from stdin")?,
    };
    if json.trim().is_empty() {
        return Ok(Filter::default());
    }
    Ok(Filter::from_json(&json)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.config.log_level);

    if let Err(errors) = cli.config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let known_tags = match cli.tags_file.as_deref() {
        Some(path) => load_known_tags(path)?,
        None => Vec::new(),
    };
    info!(known_tags = known_tags.len(), "Loaded tag vocabulary");
    let compiler = BookQueryCompiler::from_config(&cli.config, known_tags)?;

    match cli.command {
        Command::Compile {
            filter,
            ordering,
            limit,
            skip,
            order,
            keys,
            count,
            pairs,
        } => {
            let filter = read_filter(filter.as_deref())?;
            debug!(filter = ?filter, "Read filter");

            let mut params = QueryParams::new();
            params.order = order;
            params.keys = keys;
            let options = CompileOptions {
                ordering,
                limit,
                skip,
            };

            let mut compiled = compiler.compile(params, Some(&filter), options);
            if count {
                compiled.params = compiled.params.into_count_query();
            }
            for warning in &compiled.warnings {
                eprintln!("warning: {}", warning);
            }

            if pairs {
                for (name, value) in compiled.params.to_request_pairs() {
                    println!("{}={}", name, value);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&compiled)?);
            }
        }
        Command::Split { search } => {
            let split = compiler.split_search(&search);
            println!("{}", serde_json::to_string_pretty(&split)?);
        }
    }

    Ok(())
}
