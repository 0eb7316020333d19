//! Facet handlers.
//!
//! Each facet label found in the search text maps to a small handler that
//! writes its constraint into the [`QueryAccumulator`]. Labels are matched
//! ignoring case; anything without a handler is a tag literal.

pub mod exact;
pub mod level;
pub mod text;

use tracing::debug;

use crate::compiler::QueryAccumulator;
use crate::compiler::{feature, language};

/// Translates one facet value into query constraints.
pub type FacetHandler = fn(&str, &mut QueryAccumulator<'_>);

static FACET_HANDLERS: &[(&str, FacetHandler)] = &[
    ("title", text::title),
    ("uploader", text::uploader),
    ("copyright", text::copyright),
    ("license", text::license),
    ("harvestState", exact::harvest_state),
    ("country", text::country),
    ("phash", exact::phash),
    ("bookHash", exact::book_hash),
    ("level", level::apply),
    ("feature", feature::apply),
    ("originalPublisher", text::original_publisher),
    ("publisher", text::publisher),
    ("language", language::apply),
    ("brandingProjectName", exact::branding_project_name),
    ("branding", exact::branding_project_name),
    ("rebrand", exact::rebrand),
    ("bookInstanceId", exact::book_instance_id),
];

/// Looks up the handler for a facet label, ignoring case.
pub fn handler_for(label: &str) -> Option<FacetHandler> {
    FACET_HANDLERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, handler)| *handler)
}

/// Applies one special part produced by the tokenizer.
///
/// `label:value` parts with a known label go to their handler; everything
/// else, including tag literals such as `system:Incoming`, is required as a
/// tag. Facets with a blank value are ignored.
pub fn apply_special_part(part: &str, query: &mut QueryAccumulator<'_>) {
    let handled = part.split_once(':').and_then(|(label, value)| {
        handler_for(label.trim()).map(|handler| (handler, unquote(value.trim())))
    });

    match handled {
        Some((_, value)) if value.is_empty() => {
            debug!(part, "ignoring facet without a value");
        }
        Some((handler, value)) => handler(&value, query),
        None => query.tags.require(part),
    }
}

/// Strips surrounding double quotes and unescapes `\"` and `\\`.
pub fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut unescaped = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => unescaped.push(chars.next().unwrap_or('\\')),
            _ => unescaped.push(c),
        }
    }
    unescaped
}
