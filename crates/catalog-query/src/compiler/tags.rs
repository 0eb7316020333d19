//! Accumulation of constraints on the multi-valued `tags` field.
//!
//! Topic, bookshelf, level, extra tags and free-text tag literals all
//! constrain the same `tags` array. Assigning each of them to `tags` directly
//! would let the last one win, so they are collected here and combined once
//! every source has been seen.

use serde_json::{Value, json};

use super::constraints::wildcard_tag;

/// Collected tag requirements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagConstraints {
    /// Tags a book must carry verbatim.
    literals: Vec<String>,
    /// Any other constraint on the tags array (`$in`, `$nin`, `$regex`).
    parts: Vec<Value>,
}

/// How the collected constraints land in the `where` object.
#[derive(Debug, Clone, PartialEq)]
pub enum TagAssembly {
    /// Nothing to constrain.
    Empty,
    /// A single value for `where.tags`.
    Single(Value),
    /// Several `{ "tags": ... }` clauses for the top-level `$and`.
    Conjunction(Vec<Value>),
}

impl TagConstraints {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a tag, turning leading/trailing `*` into a regex.
    pub fn require(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        match wildcard_tag(tag) {
            Some(pattern) => self.parts.push(pattern),
            None => self.require_literal(tag),
        }
    }

    /// Requires an exact tag, no wildcard interpretation.
    pub fn require_literal(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.literals.contains(&tag) {
            self.literals.push(tag);
        }
    }

    /// Adds a raw constraint on the tags array.
    pub fn push_part(&mut self, part: Value) {
        self.parts.push(part);
    }

    /// Returns `true` if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.parts.is_empty()
    }

    /// Combines everything collected.
    ///
    /// A lone literal is assigned directly. Otherwise literals are grouped
    /// under `$all` and every part becomes its own `$and` clause, so a book
    /// has to satisfy all of them on the same array.
    pub fn assemble(self) -> TagAssembly {
        let TagConstraints {
            mut literals,
            mut parts,
        } = self;

        if literals.len() == 1 && parts.is_empty() {
            return TagAssembly::Single(Value::String(literals.remove(0)));
        }
        if !literals.is_empty() {
            parts.push(json!({ "$all": literals }));
        }

        match parts.len() {
            0 => TagAssembly::Empty,
            1 => TagAssembly::Single(parts.remove(0)),
            _ => TagAssembly::Conjunction(
                parts
                    .into_iter()
                    .map(|part| json!({ "tags": part }))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(TagConstraints::new().assemble(), TagAssembly::Empty);
    }

    #[test]
    fn test_single_literal() {
        let mut tags = TagConstraints::new();
        tags.require("topic:Math");
        assert_eq!(tags.assemble(), TagAssembly::Single(json!("topic:Math")));
    }

    #[test]
    fn test_duplicate_literals_collapse() {
        let mut tags = TagConstraints::new();
        tags.require("topic:Math");
        tags.require(" topic:Math ");
        assert_eq!(tags.assemble(), TagAssembly::Single(json!("topic:Math")));
    }

    #[test]
    fn test_several_literals_use_all() {
        let mut tags = TagConstraints::new();
        tags.require("topic:Math");
        tags.require("bookshelf:Enabling Writers");
        assert_eq!(
            tags.assemble(),
            TagAssembly::Single(json!({ "$all": ["topic:Math", "bookshelf:Enabling Writers"] }))
        );
    }

    #[test]
    fn test_single_part() {
        let mut tags = TagConstraints::new();
        tags.push_part(json!({ "$nin": ["topic:Math"] }));
        assert_eq!(
            tags.assemble(),
            TagAssembly::Single(json!({ "$nin": ["topic:Math"] }))
        );
    }

    #[test]
    fn test_parts_and_literals_conjoin() {
        let mut tags = TagConstraints::new();
        tags.push_part(json!({ "$in": ["level:1", "computedLevel:1"] }));
        tags.require("topic:Math");
        tags.require("bookshelf:Foo*");
        assert_eq!(
            tags.assemble(),
            TagAssembly::Conjunction(vec![
                json!({ "tags": { "$in": ["level:1", "computedLevel:1"] } }),
                json!({ "tags": { "$regex": "^bookshelf:Foo" } }),
                json!({ "tags": { "$all": ["topic:Math"] } }),
            ])
        );
    }

    #[test]
    fn test_blank_tag_ignored() {
        let mut tags = TagConstraints::new();
        tags.require("   ");
        assert!(tags.is_empty());
    }
}
