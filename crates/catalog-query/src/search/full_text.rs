//! Full-text search terms.
//!
//! Whatever the tokenizer leaves behind is matched against the `search`
//! text index of the books class.

use serde_json::{Value, json};

use crate::vocabulary::NOISE_WORDS;

/// Drops words that would match nearly every book.
pub fn remove_noise_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| {
            !NOISE_WORDS
                .iter()
                .any(|noise| noise.eq_ignore_ascii_case(word))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `$text` constraint for the `search` field.
pub fn text_search_clause(text: &str) -> Value {
    json!({ "$text": { "$search": { "$term": text } } })
}
