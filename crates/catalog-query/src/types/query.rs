//! The compiled backend query.
//!
//! [`QueryParams`] mirrors the parameters a Parse Server REST `GET
//! classes/books` accepts. `where` holds MongoDB-flavored constraints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CompileWarning;

/// Parameters for a book listing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Field constraints.
    #[serde(rename = "where")]
    pub where_clause: Map<String, Value>,
    /// Comma-separated sort keys, `-` for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Number of results to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// Comma-separated field projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    /// Comma-separated pointer fields to expand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Ask for a total count alongside the results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u8>,
}

impl QueryParams {
    /// Creates empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sort keys.
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Sets the field projection.
    pub fn with_keys(mut self, keys: impl Into<String>) -> Self {
        self.keys = Some(keys.into());
        self
    }

    /// Sets the pointer expansion list.
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    /// Turns these params into a count-only request: no rows, no sorting.
    pub fn into_count_query(mut self) -> Self {
        self.order = None;
        self.skip = None;
        self.keys = None;
        self.include = None;
        self.limit = Some(0);
        self.count = Some(1);
        self
    }

    /// Renders the params as URL query pairs, JSON-encoding `where`.
    ///
    /// Pairs come out in a fixed order so that identical queries produce
    /// identical request URLs (and cache keys).
    pub fn to_request_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![(
            "where".to_string(),
            Value::Object(self.where_clause.clone()).to_string(),
        )];
        if let Some(ref order) = self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(ref keys) = self.keys {
            pairs.push(("keys".to_string(), keys.clone()));
        }
        if let Some(ref include) = self.include {
            pairs.push(("include".to_string(), include.clone()));
        }
        if let Some(count) = self.count {
            pairs.push(("count".to_string(), count.to_string()));
        }
        pairs
    }
}

/// The outcome of compiling a filter: the query plus any diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    /// The request parameters.
    pub params: QueryParams,
    /// Non-fatal problems noticed while compiling.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CompileWarning>,
}

impl CompiledQuery {
    /// The `where` object.
    pub fn where_clause(&self) -> &Map<String, Value> {
        &self.params.where_clause
    }

    /// Returns `true` if compilation produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
