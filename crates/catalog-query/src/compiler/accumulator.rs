//! Mutable state threaded through one compilation.

use serde_json::{Map, Value};

use super::tags::{TagAssembly, TagConstraints};

/// The `where` object under construction.
///
/// Facet handlers and compiler steps write plain field constraints straight
/// into [`where_clause`](Self::where_clause); tag requirements and extra
/// top-level conjuncts are held back until [`finish`](Self::finish).
#[derive(Debug)]
pub struct QueryAccumulator<'a> {
    /// Field constraints.
    pub where_clause: Map<String, Value>,
    /// Requirements on the `tags` array.
    pub tags: TagConstraints,
    /// Clauses that must all hold, emitted under `$and`.
    pub and_clauses: Vec<Value>,
    no_language_code: &'a str,
}

impl<'a> QueryAccumulator<'a> {
    /// Creates an empty accumulator.
    pub fn new(no_language_code: &'a str) -> Self {
        Self {
            where_clause: Map::new(),
            tags: TagConstraints::new(),
            and_clauses: Vec::new(),
            no_language_code,
        }
    }

    /// Language code standing for "books without a language".
    pub fn no_language_code(&self) -> &str {
        self.no_language_code
    }

    /// Sets a field constraint, replacing any earlier one.
    pub fn set(&mut self, field: &str, constraint: Value) {
        self.where_clause.insert(field.to_string(), constraint);
    }

    /// Assembles tags and conjuncts into the final `where` object.
    pub fn finish(self) -> Map<String, Value> {
        let QueryAccumulator {
            mut where_clause,
            tags,
            and_clauses,
            ..
        } = self;

        let mut conjuncts = match tags.assemble() {
            TagAssembly::Empty => Vec::new(),
            TagAssembly::Single(constraint) => {
                where_clause.insert("tags".to_string(), constraint);
                Vec::new()
            }
            TagAssembly::Conjunction(clauses) => clauses,
        };
        conjuncts.extend(and_clauses);

        if !conjuncts.is_empty() {
            where_clause.insert("$and".to_string(), Value::Array(conjuncts));
        }
        where_clause
    }
}
