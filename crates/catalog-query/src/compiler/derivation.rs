//! Lineage (`derivedFrom`) constraints.
//!
//! A derived book records the instance ids of the books it was made from in
//! `bookLineageArray`. Restricting to books derived from a collection is a
//! `$select` over that collection's `bookInstanceId`s.

use serde_json::{Map, Value, json};

use crate::types::Filter;

use super::constraints::select;

/// Fields that describe visibility of the parent books rather than which
/// books they are. They are dropped from the inner query.
pub const LINEAGE_IRRELEVANT_FIELDS: &[&str] = &["inCirculation", "draft", "baseUrl"];

/// Removes [`LINEAGE_IRRELEVANT_FIELDS`] from a compiled parent `where`.
pub fn strip_lineage_irrelevant(where_clause: &mut Map<String, Value>) {
    for field in LINEAGE_IRRELEVANT_FIELDS {
        where_clause.remove(*field);
    }
}

/// The `bookLineageArray` constraint for an already compiled parent query.
pub fn lineage_constraint(parent_where: Map<String, Value>) -> Value {
    select("books", parent_where, "bookInstanceId")
}

/// A clause keeping the parent collection itself out of the results.
///
/// Derived books are usually published by someone else, so the first of the
/// parent's publisher, branding project or extra tags that is set becomes a
/// negative constraint. Returns `None` when the parent filter has none.
pub fn parent_exclusion(parent: &Filter) -> Option<Value> {
    if let Some(publisher) = non_blank(parent.publisher.as_deref()) {
        return Some(json!({ "publisher": { "$ne": publisher } }));
    }
    if let Some(branding) = non_blank(parent.branding_project_name.as_deref()) {
        return Some(json!({ "brandingProjectName": { "$ne": branding } }));
    }
    let tags: Vec<&str> = parent
        .other_tags
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        None
    } else {
        Some(json!({ "tags": { "$nin": tags } }))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
