//! Schema-less JSON values.
//!
//! [`RawValue`] is the decoded form of a rule source document. Objects keep
//! their keys in document order so traversal and the JSON fallback dump are
//! deterministic for identical input.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::Result;

/// A decoded JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<RawValue>),
    Object(RawObject),
}

/// A JSON object with keys in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObject {
    entries: Vec<(String, RawValue)>,
}

impl RawValue {
    /// Decode a JSON document.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    /// Decode a JSON document from bytes.
    pub fn parse_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from(value))
    }

    /// String form of a primitive value.
    ///
    /// Returns `None` for null, arrays and objects.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::String(s) => Some(s.clone()),
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Null | RawValue::Array(_) | RawValue::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&RawObject> {
        match self {
            RawValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Compact JSON text of this value.
    pub fn to_json_string(&self) -> String {
        Value::from(self).to_string()
    }
}

impl RawObject {
    /// Create an object from ordered entries.
    ///
    /// A repeated key keeps its first position and its last value, which is
    /// how the JSON decoder treats duplicates.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, RawValue)>) -> Self {
        let mut obj = Self::default();
        for (key, value) in entries {
            match obj.entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => obj.entries.push((key, value)),
            }
        }
        obj
    }

    /// Look up a key. Presence is what matters: a key mapped to null is found.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &RawValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => RawValue::Number(n),
            Value::String(s) => RawValue::String(s),
            Value::Array(items) => RawValue::Array(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => RawValue::Object(RawObject::from_entries(
                map.into_iter().map(|(k, v)| (k, RawValue::from(v))),
            )),
        }
    }
}

impl From<&RawValue> for Value {
    fn from(value: &RawValue) -> Self {
        match value {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(*b),
            RawValue::Number(n) => Value::Number(n.clone()),
            RawValue::String(s) => Value::String(s.clone()),
            RawValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            RawValue::Object(obj) => {
                let mut map = Map::with_capacity(obj.len());
                for (k, v) in obj.iter() {
                    map.insert(k.to_string(), Value::from(v));
                }
                Value::Object(map)
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}
