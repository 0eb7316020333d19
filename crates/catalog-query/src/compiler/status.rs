//! Circulation, draft and rebrand switches.
//!
//! Withdrawn books and drafts are hidden unless the caller explicitly asks
//! for them: an unset switch is restrictive, and only
//! [`BooleanOption::All`] drops the constraint.

use serde_json::json;

use crate::types::{BooleanOption, Filter};

use super::accumulator::QueryAccumulator;

/// Applies the three tri-state switches of `filter`.
pub fn apply(filter: &Filter, query: &mut QueryAccumulator<'_>) {
    match filter.in_circulation {
        // Books that predate the field have no value and count as circulating.
        None | Some(BooleanOption::Yes) => query.set("inCirculation", json!({ "$in": [true, null] })),
        Some(BooleanOption::No) => query.set("inCirculation", json!(false)),
        Some(BooleanOption::All) => {}
    }

    match filter.draft {
        None | Some(BooleanOption::No) => query.set("draft", json!(false)),
        Some(BooleanOption::Yes) => query.set("draft", json!(true)),
        Some(BooleanOption::All) => {}
    }

    match filter.rebrand {
        Some(BooleanOption::Yes) => query.set("rebrand", json!(true)),
        Some(BooleanOption::No) => query.set("rebrand", json!({ "$ne": true })),
        None | Some(BooleanOption::All) => {}
    }
}
