//! Facets matched exactly.

use serde_json::Value;

use crate::compiler::QueryAccumulator;

/// Exact `harvestState`.
pub fn harvest_state(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("harvestState", Value::String(value.to_string()));
}

/// Perceptual hash of the first content image.
pub fn phash(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("phashOfFirstContentImage", Value::String(value.to_string()));
}

/// Hash over all images of the book.
pub fn book_hash(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("bookHashFromImages", Value::String(value.to_string()));
}

/// Exact `bookInstanceId`.
pub fn book_instance_id(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("bookInstanceId", Value::String(value.to_string()));
}

/// Used for both `branding:` and `brandingProjectName:`.
pub fn branding_project_name(value: &str, query: &mut QueryAccumulator<'_>) {
    query.set("brandingProjectName", Value::String(value.to_string()));
}

/// `rebrand:true` or `rebrand:yes`; anything else means not rebranded.
pub fn rebrand(value: &str, query: &mut QueryAccumulator<'_>) {
    let rebranded = value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes");
    query.set("rebrand", Value::Bool(rebranded));
}
