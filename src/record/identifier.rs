//! Record identifiers with coercive equality
//!
//! Request paths carry identifiers as text while stored records may hold
//! them as numbers. An `Identifier` normalizes both sides to the same
//! textual form so `"2"` and `2` compare equal.

use std::fmt;

use serde_json::Value;

use super::access::number_text;

/// A record identifier, normalized to its coerced text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Build an identifier from raw request text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Build an identifier from a stored value.
    ///
    /// Coercion rules:
    /// - string → the string itself
    /// - number → canonical decimal text (`2`, `2.5`; `2.0` is `2`)
    /// - bool → `true` / `false`
    /// - null, array, object → not an identifier
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(number_text(n))),
            Value::Bool(b) => Some(Self(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Read the identifier stored under `id_field` of a record.
    pub fn of_record(record: &Value, id_field: &str) -> Option<Self> {
        record.get(id_field).and_then(Self::from_value)
    }

    /// Coercive comparison against a stored value.
    pub fn matches(&self, value: &Value) -> bool {
        Self::from_value(value).is_some_and(|other| other == *self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
