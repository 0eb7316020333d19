//! Shared fixtures for the catalog query integration tests.

#![allow(dead_code)]

use catalog_query::{BookQueryCompiler, CompiledQuery, Filter};
use serde_json::Value;

/// Tag literals as they might come back from the tag list endpoint.
pub fn known_tags() -> Vec<String> {
    [
        "system:Incoming",
        "topic:Animal Stories",
        "topic:Health",
        "topic:Math",
        "bookshelf:Enabling Writers Workshops",
        "list:Wall Chart",
    ]
    .iter()
    .map(|tag| tag.to_string())
    .collect()
}

/// A compiler with the built-in vocabularies and [`known_tags`].
pub fn compiler() -> BookQueryCompiler {
    init_test_logging();
    BookQueryCompiler::new(known_tags())
}

/// Compiles with default params and options and returns `where` as a value.
pub fn where_of(filter: &Filter) -> Value {
    Value::Object(compiler().compile_filter(filter).params.where_clause)
}

/// Compiles with default params and options.
pub fn compile(filter: &Filter) -> CompiledQuery {
    compiler().compile_filter(filter)
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
