//! Field access over JSON records
//!
//! Recursive-descent helpers shared by the query engine and the
//! relationship resolver. Nothing here allocates a new tree; every
//! accessor borrows from the record it walks.

use serde_json::{Number, Value};

/// Resolve a dotted path (`author.name`, `tags.0`) inside a record.
///
/// Object segments are looked up by key, array segments by index.
/// Any missing step yields `None`.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(direct) = record.as_object().and_then(|obj| obj.get(path)) {
        return Some(direct);
    }

    path.split('.').try_fold(record, |current, segment| match current {
        Value::Object(obj) => obj.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Render a value the way filters compare it.
///
/// Null counts as absent, so it has no textual form.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| stringify(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Canonical decimal text of a number.
///
/// Whole floats print without a fraction (`2.0` -> `2`) so they compare
/// equal to integers and to request text.
pub fn number_text(n: &Number) -> String {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Coerce a value to a number for range comparisons.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Parse request text as a number. Blank text is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// JSON type name of a value, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// True if any string leaf reachable from `value` contains `needle`.
///
/// `needle` must already be lowercased.
pub fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Object(obj) => obj.values().any(|v| contains_text(v, needle)),
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        _ => false,
    }
}
