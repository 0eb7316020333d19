//! Topic filter translation.

use serde_json::json;

use crate::vocabulary::TopicVocabulary;

use super::constraints::anchored_ci;
use super::tags::TagConstraints;

/// Adds the tag requirements for a topic filter.
///
/// - a known topic, in any casing, requires its canonical `topic:X` tag
/// - the catch-all topic excludes every known topic tag
/// - an unknown topic matches `topic:<value>` ignoring case
/// - a comma list matches any of its topics ignoring case
pub fn apply(topics: &TopicVocabulary, topic: &str, tags: &mut TagConstraints) {
    let names: Vec<&str> = topic
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    match names.as_slice() {
        [] => {}
        [single] => apply_single(topics, single, tags),
        many => {
            let alternatives = many
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<_>>()
                .join("|");
            tags.push_part(json!({
                "$regex": format!("^topic:({})$", alternatives),
                "$options": "i"
            }));
        }
    }
}

fn apply_single(topics: &TopicVocabulary, name: &str, tags: &mut TagConstraints) {
    if topics.is_no_topic(name) {
        tags.push_part(json!({ "$nin": topics.topic_tags() }));
    } else if let Some(canonical) = topics.canonical(name) {
        tags.require_literal(format!("topic:{}", canonical));
    } else {
        tags.push_part(anchored_ci(&format!("topic:{}", name)));
    }
}
