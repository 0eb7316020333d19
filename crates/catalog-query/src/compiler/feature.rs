//! Feature filter translation. `"a OR b"` matches books with either feature.

use serde_json::{Value, json};

use super::accumulator::QueryAccumulator;

const ALTERNATION: &str = " OR ";

/// Restricts the `features` array.
pub fn apply(expression: &str, query: &mut QueryAccumulator<'_>) {
    let features: Vec<&str> = expression
        .split(ALTERNATION)
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .collect();

    match features.as_slice() {
        [] => {}
        [single] => query.set("features", Value::String(single.to_string())),
        many => query.set("features", json!({ "$in": many })),
    }
}
