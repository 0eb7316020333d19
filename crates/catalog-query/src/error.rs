//! Error and diagnostic types for the catalog query layer.
//!
//! Compilation itself never fails: anything the compiler cannot make sense of
//! still produces a query, and problems worth surfacing are reported as
//! [`CompileWarning`] values alongside it. [`CatalogError`] covers the
//! surrounding plumbing: decoding filters, loading tag lists, configuration.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The error type for everything around the compiler.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A filter could not be decoded from JSON.
    #[error("invalid filter JSON: {0}")]
    FilterJson(#[from] serde_json::Error),

    /// A tag vocabulary file could not be read.
    #[error("failed to read tag list from '{path}': {source}")]
    TagList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler configuration is inconsistent.
    #[error("invalid configuration: {}", .0.join("; "))]
    Config(Vec<String>),

    /// An ordering scheme name was not recognized.
    #[error("unknown ordering scheme: {0}")]
    UnknownOrdering(String),

    /// A tri-state option name was not recognized.
    #[error("unknown boolean option: {0} (expected Yes, No or All)")]
    UnknownBooleanOption(String),
}

/// Result type for catalog plumbing.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A non-fatal diagnostic produced while compiling a filter.
///
/// The compiler returns these to its caller instead of interrupting the user;
/// the UI layer decides whether any of them deserve a dialog.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CompileWarning {
    /// No filter was supplied; the empty filter was compiled instead.
    #[error("no filter supplied, compiled as an empty filter")]
    MissingFilter,

    /// A `derivedFrom` filter gave no way to exclude the parent books themselves.
    #[error(
        "derivedFrom filter needs a publisher, brandingProjectName or otherTags to exclude the parent collection"
    )]
    UnderivableParentExclusion,
}

impl CompileWarning {
    /// Short machine-readable code for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            CompileWarning::MissingFilter => "missing-filter",
            CompileWarning::UnderivableParentExclusion => "underivable-parent-exclusion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_joins_messages() {
        let err = CatalogError::Config(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "invalid configuration: a; b");
    }

    #[test]
    fn test_warning_serializes_with_kind() {
        let s = serde_json::to_string(&CompileWarning::MissingFilter).unwrap();
        assert_eq!(s, r#"{"kind":"missingFilter"}"#);
        assert_eq!(
            CompileWarning::UnderivableParentExclusion.code(),
            "underivable-parent-exclusion"
        );
    }
}
