//! Search-string tokenizer.
//!
//! Splits a raw search string into ordinary keywords and "special parts":
//! facet expressions (`uploader:joe`, `title:"Big Pond"`) and tag literals
//! known to the database (`system:Incoming`, `topic:Animal Stories`).
//!
//! # Example
//!
//! ```
//! use catalog_query::search::split_string;
//!
//! let split = split_string("frogs level:2 topic:Math", &["topic:Math"]);
//! assert_eq!(split.other_search_terms, "frogs");
//! assert_eq!(split.special_parts, vec!["level:2", "topic:Math"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::vocabulary::FACET_PREFIXES;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static SPACE_AFTER_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r": +").expect("colon pattern is valid"));

/// The result of splitting a search string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitSearch {
    /// What is left once every special part has been removed.
    pub other_search_terms: String,
    /// Facets and tag literals, in discovery order.
    pub special_parts: Vec<String>,
}

/// Splits `input` into keywords and special parts.
///
/// Candidates are tried in order: every fixed facet prefix, then every entry
/// of `known_tags`. Each candidate is extracted repeatedly until it no longer
/// occurs, so the resulting order follows the candidate list rather than the
/// input.
///
/// A tag literal found with a casing that matches exactly one vocabulary
/// entry is reported with the vocabulary's casing. When the vocabulary holds
/// several entries differing only by case, the input's casing is kept.
pub fn split_string<S: AsRef<str>>(input: &str, known_tags: &[S]) -> SplitSearch {
    let collapsed = WHITESPACE.replace_all(input, " ");
    let mut text = SPACE_AFTER_COLON
        .replace_all(collapsed.trim(), ":")
        .into_owned();
    let mut special_parts = Vec::new();

    for prefix in FACET_PREFIXES {
        while let Some((start, prefix_end)) = find_candidate(&text, prefix, false) {
            let end = facet_value_end(&text, prefix_end);
            special_parts.push(text[start..end].to_string());
            text = remove_span(&text, start, end);
        }
    }

    for tag in known_tags.iter().map(AsRef::as_ref) {
        if tag.trim().is_empty() {
            continue;
        }
        while let Some((start, end)) = find_candidate(&text, tag, true) {
            let found = &text[start..end];
            let mut same_text = known_tags
                .iter()
                .map(AsRef::as_ref)
                .filter(|known| known.to_lowercase() == found.to_lowercase());
            let part = match (same_text.next(), same_text.next()) {
                (Some(only), None) => only.to_string(),
                _ => found.to_string(),
            };
            special_parts.push(part);
            text = remove_span(&text, start, end);
        }
    }

    SplitSearch {
        other_search_terms: text,
        special_parts,
    }
}

/// Finds the earliest case-insensitive occurrence of `needle` that starts a
/// word. Tag literals must also end one.
fn find_candidate(text: &str, needle: &str, whole_word: bool) -> Option<(usize, usize)> {
    text.char_indices()
        .map(|(i, _)| i)
        .filter(|&i| is_left_boundary(text, i))
        .find_map(|start| {
            let end = match_ci_at(text, start, needle)?;
            if whole_word && !is_right_boundary(text, end) {
                return None;
            }
            Some((start, end))
        })
}

/// Matches `needle` at byte offset `start`, returning the end offset.
fn match_ci_at(text: &str, start: usize, needle: &str) -> Option<usize> {
    let mut hay = text[start..].chars();
    let mut end = start;
    for expected in needle.chars() {
        let found = hay.next()?;
        if found != expected && !found.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        end += found.len_utf8();
    }
    Some(end)
}

fn is_left_boundary(text: &str, index: usize) -> bool {
    matches!(text[..index].chars().next_back(), None | Some(' ') | Some('"'))
}

fn is_right_boundary(text: &str, index: usize) -> bool {
    matches!(text[index..].chars().next(), None | Some(' ') | Some('"'))
}

/// End of a facet value starting at `value_start`: a full quoted string, or
/// everything up to the next space.
fn facet_value_end(text: &str, value_start: usize) -> usize {
    let rest = &text[value_start..];
    if !rest.starts_with('"') {
        return rest.find(' ').map_or(text.len(), |i| value_start + i);
    }

    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => return value_start + i + 1,
            _ => {}
        }
    }
    text.len()
}

fn remove_span(text: &str, start: usize, end: usize) -> String {
    let joined = format!("{}{}", &text[..start], &text[end..]);
    joined.replace("  ", " ").trim().to_string()
}
