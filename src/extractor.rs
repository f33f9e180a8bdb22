//! Rule candidate extraction from arbitrarily nested JSON.
//!
//! Rule providers nest their rules at unpredictable depths. An object is
//! taken as a single rule when it carries at least one rule-ish key and is
//! small; anything else is a container and gets walked.

use crate::raw::{RawObject, RawValue};

/// Keys whose presence marks an object as a rule.
pub const RULE_KEYS: &[&str] = &[
    "rule", "type", "value", "payload", "pattern", "domain", "content", "host",
];

/// Objects with more keys than this are always treated as containers.
pub const MAX_RULE_OBJECT_KEYS: usize = 30;

/// A raw value that represents a single rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleCandidate<'a> {
    /// String form of a primitive
    Text(String),
    /// A rule-like object
    Object(&'a RawObject),
}

/// Check whether an object looks like one rule rather than a container.
pub fn is_rule_object(obj: &RawObject) -> bool {
    obj.len() <= MAX_RULE_OBJECT_KEYS && obj.keys().any(|k| RULE_KEYS.contains(&k))
}

/// Flatten a value into rule candidates, in document order.
pub fn flatten(value: &RawValue) -> Vec<RuleCandidate<'_>> {
    let mut out = Vec::new();
    flatten_into(value, &mut out);
    out
}

fn flatten_into<'a>(value: &'a RawValue, out: &mut Vec<RuleCandidate<'a>>) {
    match value {
        RawValue::Null => {}
        RawValue::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        RawValue::Object(obj) if is_rule_object(obj) => out.push(RuleCandidate::Object(obj)),
        RawValue::Object(obj) => {
            for child in obj.values() {
                flatten_into(child, out);
            }
        }
        RawValue::Bool(_) | RawValue::Number(_) | RawValue::String(_) => {
            if let Some(text) = value.as_text() {
                out.push(RuleCandidate::Text(text));
            }
        }
    }
}
