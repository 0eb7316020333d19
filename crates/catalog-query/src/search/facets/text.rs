//! Facets matched as case-insensitive substrings.

use serde_json::json;

use crate::compiler::QueryAccumulator;
use crate::compiler::constraints::{contains_ci, in_query};

/// Substring of `title`.
pub fn title(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("title", contains_ci(value));
}

/// Substring of `copyright`.
pub fn copyright(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("copyright", contains_ci(value));
}

/// Substring of `license`.
pub fn license(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("license", contains_ci(value));
}

/// Substring of `country`.
pub fn country(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("country", contains_ci(value));
}

/// Substring of `publisher`.
pub fn publisher(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("publisher", contains_ci(value));
}

/// Substring of `originalPublisher`.
pub fn original_publisher(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("originalPublisher", contains_ci(value));
}

/// Books whose uploader's email contains `value`.
pub fn uploader(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set(
        "uploader",
        in_query("_User", json!({ "email": contains_ci(value) })),
    );
}
