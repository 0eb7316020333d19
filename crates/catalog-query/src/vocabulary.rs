//! Fixed vocabularies shared by the tokenizer and the compiler.
//!
//! The catalog stores most classification as strings in a book's `tags`
//! array using a `prefix:value` convention (`topic:Math`, `level:2`,
//! `bookshelf:Foo/Bar`). This module holds the closed lists the compiler
//! needs to reason about those tags.

use std::fs;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};

/// Facet prefixes recognized in free-text search, in match priority order.
pub const FACET_PREFIXES: &[&str] = &[
    "title:",
    "uploader:",
    "copyright:",
    "license:",
    "harvestState:",
    "country:",
    "phash:",
    "bookHash:",
    "level:",
    "feature:",
    "originalPublisher:",
    "publisher:",
    "language:",
    "brandingProjectName:",
    "branding:",
    "rebrand:",
    "bookInstanceId:",
];

/// Canonical topic names. The last entry is the catch-all for untagged books.
pub const DEFAULT_TOPICS: &[&str] = &[
    "Agriculture",
    "Animal Stories",
    "Bible",
    "Business",
    "Community Living",
    "Culture",
    "Dictionary",
    "Environment",
    "Fiction",
    "Health",
    "How To",
    "Math",
    "Non Fiction",
    "Personal Development",
    "Primer",
    "Science",
    "Spiritual",
    "Story Book",
    "Traditional Story",
    "Other",
];

/// Name of the topic meaning "none of the known topics".
pub const DEFAULT_NO_TOPIC_NAME: &str = "Other";

/// Language code meaning "books with no language at all".
pub const DEFAULT_NO_LANGUAGE_CODE: &str = "noLanguage";

/// Primary reading levels.
pub const PRIMARY_LEVELS: &[&str] = &["1", "2", "3", "4"];

/// Words that carry no meaning in a catalog full of books.
pub const NOISE_WORDS: &[&str] = &["book", "books", "libro", "libros", "livre", "livres"];

/// The eight tags that assign a level, either by hand or computed.
pub fn all_level_tags() -> Vec<String> {
    PRIMARY_LEVELS
        .iter()
        .map(|level| format!("level:{}", level))
        .chain(
            PRIMARY_LEVELS
                .iter()
                .map(|level| format!("computedLevel:{}", level)),
        )
        .collect()
}

/// Title-cases a topic name typed or picked in the UI.
///
/// Each whitespace-separated word gets an uppercase first character and a
/// lowercase remainder, using Unicode case mappings.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads known tag literals from a file, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn load_known_tags(path: impl AsRef<Path>) -> CatalogResult<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::TagList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// The closed topic vocabulary used to normalize and negate topic filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicVocabulary {
    topics: Vec<String>,
    no_topic_name: String,
}

impl Default for TopicVocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            DEFAULT_NO_TOPIC_NAME,
        )
    }
}

impl TopicVocabulary {
    /// Creates a vocabulary from canonical names and the catch-all name.
    pub fn new(topics: Vec<String>, no_topic_name: impl Into<String>) -> Self {
        Self {
            topics,
            no_topic_name: no_topic_name.into(),
        }
    }

    /// Canonical topic names, catch-all included if it was listed.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Returns `true` if `name` is the catch-all topic, in any casing.
    pub fn is_no_topic(&self, name: &str) -> bool {
        name.trim().to_lowercase() == self.no_topic_name.to_lowercase()
    }

    /// Looks up the canonical spelling of a topic, ignoring case.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.topics
            .iter()
            .find(|topic| topic.to_lowercase() == wanted)
            .map(String::as_str)
    }

    /// `topic:X` tags for every real topic (the catch-all excluded).
    pub fn topic_tags(&self) -> Vec<String> {
        self.topics
            .iter()
            .filter(|topic| !self.is_no_topic(topic))
            .map(|topic| format!("topic:{}", topic))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_level_tags() {
        let tags = all_level_tags();
        assert_eq!(tags.len(), 8);
        assert_eq!(tags[0], "level:1");
        assert_eq!(tags[7], "computedLevel:4");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("animal stories"), "Animal Stories");
        assert_eq!(title_case("  HOW   to "), "How To");
        assert_eq!(title_case("éducation"), "Éducation");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_topic_lookup() {
        let vocabulary = TopicVocabulary::default();
        assert_eq!(vocabulary.canonical("bible"), Some("Bible"));
        assert_eq!(vocabulary.canonical("NON FICTION"), Some("Non Fiction"));
        assert_eq!(vocabulary.canonical("cooking"), None);
        assert!(vocabulary.is_no_topic("OTHER"));
        assert!(!vocabulary.topic_tags().contains(&"topic:Other".to_string()));
        assert_eq!(vocabulary.topic_tags().len(), DEFAULT_TOPICS.len() - 1);
    }

    #[test]
    fn test_load_known_tags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# exported tags\nsystem:Incoming\n\n  topic:Animal Stories  ").unwrap();
        let tags = load_known_tags(file.path()).unwrap();
        assert_eq!(tags, vec!["system:Incoming", "topic:Animal Stories"]);
    }

    #[test]
    fn test_load_known_tags_missing_file() {
        let err = load_known_tags("/nonexistent/tags.txt").unwrap_err();
        assert!(matches!(err, CatalogError::TagList { .. }));
    }
}
