//! Builders for the Parse/MongoDB constraint shapes the compiler emits.

use serde_json::{Map, Value, json};

/// Case-insensitive substring match on a user-supplied value.
pub fn contains_ci(value: &str) -> Value {
    json!({ "$regex": regex::escape(value), "$options": "i" })
}

/// Case-insensitive whole-value match on a user-supplied value.
pub fn anchored_ci(value: &str) -> Value {
    json!({ "$regex": format!("^{}$", regex::escape(value)), "$options": "i" })
}

/// Join against another class: the pointer field must point at a row of
/// `class_name` matching `where_clause`.
pub fn in_query(class_name: &str, where_clause: Value) -> Value {
    json!({
        "$inQuery": {
            "where": where_clause,
            "className": class_name
        }
    })
}

/// The field's value must equal `key` of some row of `class_name` matching
/// `where_clause`.
pub fn select(class_name: &str, where_clause: Map<String, Value>, key: &str) -> Value {
    json!({
        "$select": {
            "query": {
                "className": class_name,
                "where": Value::Object(where_clause)
            },
            "key": key
        }
    })
}

/// Turns a tag carrying `*` wildcards at either end into a regex constraint.
///
/// Returns `None` for tags without wildcards. The `^` anchor is dropped when
/// the tag starts with `*`, the `$` anchor when it ends with one.
pub fn wildcard_tag(tag: &str) -> Option<Value> {
    let leading = tag.starts_with('*');
    let trailing = tag.len() > 1 && tag.ends_with('*');
    if !leading && !trailing {
        return None;
    }

    let core = tag.trim_matches('*');
    let mut pattern = String::new();
    if !leading {
        pattern.push('^');
    }
    pattern.push_str(&regex::escape(core));
    if !trailing {
        pattern.push('$');
    }
    Some(json!({ "$regex": pattern }))
}
