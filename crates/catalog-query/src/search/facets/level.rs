//! The `level:` facet.
//!
//! A book's reading level is either set by hand (`level:N`) or computed
//! (`computedLevel:N`), and a hand-set level wins. `level:N` therefore
//! accepts either tag but rejects books hand-set to a different primary
//! level. `level:empty` finds books with no level at all.

use serde_json::json;

use crate::compiler::QueryAccumulator;
use crate::vocabulary::{PRIMARY_LEVELS, all_level_tags};

const EMPTY: &str = "empty";

/// Adds the tag parts for one `level:` value.
pub fn apply(value: &str, query: &mut QueryAccumulator<'_>) {
    if value.eq_ignore_ascii_case(EMPTY) {
        query.tags.push_part(json!({ "$nin": all_level_tags() }));
        return;
    }

    query.tags.push_part(json!({
        "$in": [format!("level:{}", value), format!("computedLevel:{}", value)]
    }));
    let others: Vec<String> = PRIMARY_LEVELS
        .iter()
        .filter(|level| **level != value)
        .map(|level| format!("level:{}", level))
        .collect();
    query.tags.push_part(json!({ "$nin": others }));
}
