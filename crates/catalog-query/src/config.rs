//! Compiler configuration.
//!
//! The vocabularies the compiler reasons about can be replaced without a
//! rebuild, either on the command line or through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CATALOG_TOPICS` | built-in list | Canonical topic names (comma-separated) |
//! | `CATALOG_NO_TOPIC_NAME` | Other | Topic meaning "no known topic" |
//! | `CATALOG_NO_LANGUAGE_CODE` | noLanguage | Language code meaning "no language" |
//! | `CATALOG_UNBOUNDED_LIMIT` | 10000000 | `limit` used when every match is wanted |
//! | `CATALOG_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use catalog_query::CompilerConfig;
//!
//! let config = CompilerConfig {
//!     topics: vec!["Math".to_string(), "Science".to_string()],
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.topic_vocabulary().topic_tags(), vec!["topic:Math", "topic:Science"]);
//! ```

use clap::Parser;

use crate::vocabulary::{
    DEFAULT_NO_LANGUAGE_CODE, DEFAULT_NO_TOPIC_NAME, DEFAULT_TOPICS, TopicVocabulary,
};

/// Limit used when a listing must return every match.
pub const DEFAULT_UNBOUNDED_LIMIT: u64 = 10_000_000;

/// Settings for [`BookQueryCompiler`](crate::BookQueryCompiler).
#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-query")]
#[command(about = "Book catalog filter compiler")]
pub struct CompilerConfig {
    /// Canonical topic names (comma-separated). Empty means the built-in list.
    #[arg(long, env = "CATALOG_TOPICS", value_delimiter = ',')]
    pub topics: Vec<String>,

    /// Topic name that selects books without any known topic.
    #[arg(long, env = "CATALOG_NO_TOPIC_NAME", default_value = DEFAULT_NO_TOPIC_NAME)]
    pub no_topic_name: String,

    /// Language code that selects books without a language.
    #[arg(long, env = "CATALOG_NO_LANGUAGE_CODE", default_value = DEFAULT_NO_LANGUAGE_CODE)]
    pub no_language_code: String,

    /// `limit` applied by orderings that fetch every match.
    #[arg(long, env = "CATALOG_UNBOUNDED_LIMIT", default_value = "10000000")]
    pub unbounded_limit: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CATALOG_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            no_topic_name: DEFAULT_NO_TOPIC_NAME.to_string(),
            no_language_code: DEFAULT_NO_LANGUAGE_CODE.to_string(),
            unbounded_limit: DEFAULT_UNBOUNDED_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Creates a configuration from environment variables only.
    pub fn from_env() -> Self {
        // No command line: only env vars and defaults apply
        Self::try_parse_from(["catalog-query"]).unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.no_topic_name.trim().is_empty() {
            errors.push("No-topic name cannot be empty".to_string());
        }

        if self.no_language_code.trim().is_empty() {
            errors.push("No-language code cannot be empty".to_string());
        }

        if self.unbounded_limit == 0 {
            errors.push("Unbounded limit cannot be 0".to_string());
        }

        if self.topics.iter().any(|topic| topic.trim().is_empty()) {
            errors.push("Topic names cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The topic vocabulary this configuration describes.
    pub fn topic_vocabulary(&self) -> TopicVocabulary {
        let topics = if self.topics.is_empty() {
            DEFAULT_TOPICS.iter().map(|topic| topic.to_string()).collect()
        } else {
            self.topics
                .iter()
                .map(|topic| topic.trim().to_string())
                .collect()
        };
        TopicVocabulary::new(topics, self.no_topic_name.trim())
    }
}
