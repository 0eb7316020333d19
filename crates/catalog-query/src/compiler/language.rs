//! Language filter translation.
//!
//! Books point at rows of the `language` class through `langPointers`.

use serde_json::json;

use super::accumulator::QueryAccumulator;
use super::constraints::in_query;

/// Restricts to books in the language with ISO code `code`.
pub fn apply(code: &str, query: &mut QueryAccumulator<'_>) {
    let code = code.trim();
    if code.is_empty() {
        return;
    }
    let constraint = if code.eq_ignore_ascii_case(query.no_language_code()) {
        json!({ "$eq": [] })
    } else {
        in_query("language", json!({ "isoCode": code }))
    };
    query.set("langPointers", constraint);
}
