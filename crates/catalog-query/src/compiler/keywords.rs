//! Keyword matching against the precomputed `keywordStems` array.

use serde_json::json;

use super::accumulator::QueryAccumulator;

/// Requires every stem of `text` to be among the book's keyword stems.
pub fn apply(text: &str, query: &mut QueryAccumulator<'_>) {
    let stems = stems(text);
    if !stems.is_empty() {
        query.set("keywordStems", json!({ "$all": stems }));
    }
}

/// Lowercased, de-duplicated stems of the words in `text`.
pub fn stems(text: &str) -> Vec<String> {
    let mut stems: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.is_empty() {
            continue;
        }
        let stem = stem(&word);
        if !stems.contains(&stem) {
            stems.push(stem);
        }
    }
    stems
}

/// Strips possessive and plural endings.
fn stem(word: &str) -> String {
    for possessive in ["'s", "\u{2019}s"] {
        if let Some(base) = word.strip_suffix(possessive) {
            return base.to_string();
        }
    }
    if word.chars().count() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}
