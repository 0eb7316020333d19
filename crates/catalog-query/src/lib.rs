//! Book Catalog Query Compiler
//!
//! This crate compiles the filters of a digital book library catalog into
//! Parse Server / MongoDB-style query parameters (`where`, `order`, `limit`,
//! `skip`, `keys`). It performs no I/O: the caller sends the resulting
//! request to `classes/books` itself.
//!
//! # Features
//!
//! - **Faceted search text**: `uploader:joe title:"Big Pond" level:2 frogs`
//! - **Tag literal recognition**: multi-word tags known to the database are
//!   picked out of free text and normalized to the database's casing
//! - **Tag merging**: topic, bookshelf, level and extra tags all constrain the
//!   same `tags` array without overwriting each other
//! - **Visibility defaults**: drafts and withdrawn books are hidden unless a
//!   filter explicitly asks for them
//! - **Lineage**: "books derived from this collection" via `$select`
//! - **Diagnostics**: returned in the result, never raised
//!
//! # Architecture
//!
//! - [`types`] - Filters, ordering schemes and compiled queries
//! - [`search`] - Search-string tokenizer, facet handlers, full-text terms
//! - [`compiler`] - The filter compiler and its per-dimension steps
//! - [`vocabulary`] - Facet prefixes, topics, levels, noise words
//! - [`config`] - Compiler configuration from arguments or environment
//! - [`error`] - Error and warning types
//!
//! # Quick Start
//!
//! ```
//! use catalog_query::{BookOrderingScheme, BookQueryCompiler, CompileOptions, Filter, QueryParams};
//! use serde_json::json;
//!
//! let compiler = BookQueryCompiler::new(vec!["system:Incoming".to_string()]);
//!
//! let filter = Filter::new()
//!     .with_search("uploader:joe@example.com frogs")
//!     .with_language("fr");
//!
//! let compiled = compiler.compile(
//!     QueryParams::new().with_keys("title,tags"),
//!     Some(&filter),
//!     CompileOptions::ordered(BookOrderingScheme::Default).with_limit(20),
//! );
//!
//! assert!(compiled.is_clean());
//! assert_eq!(compiled.params.order.as_deref(), Some("$score"));
//! assert_eq!(compiled.params.keys.as_deref(), Some("$score,title,tags"));
//! assert_eq!(
//!     compiled.where_clause()["langPointers"]["$inQuery"]["where"],
//!     json!({ "isoCode": "fr" })
//! );
//! ```
//!
//! # Tokenizing
//!
//! ```
//! use catalog_query::search::split_string;
//!
//! let split = split_string(
//!     "topic:health cats topic:math topic:Math",
//!     &["topic:Health", "topic:math", "topic:Math"],
//! );
//! assert_eq!(split.other_search_terms, "cats");
//! assert_eq!(split.special_parts, vec!["topic:Health", "topic:math", "topic:Math"]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compiler;
pub mod config;
pub mod error;
pub mod search;
pub mod types;
pub mod vocabulary;

// Re-export commonly used types at crate root
pub use compiler::{BookQueryCompiler, CompileOptions};
pub use config::CompilerConfig;
pub use error::{CatalogError, CatalogResult, CompileWarning};
pub use search::{SplitSearch, split_string};
pub use types::{
    BookOrderingScheme, BooleanOption, ColumnFilter, CompiledQuery, Filter, QueryParams,
};
pub use vocabulary::{TopicVocabulary, load_known_tags};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
