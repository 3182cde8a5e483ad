//! # Filter Expressions
//!
//! Exact-match and operator filters for collection queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{as_number, lookup, parse_number, stringify};

/// Operators selected by a `<field>_<op>` parameter suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Greater than or equal, numeric
    #[serde(rename = "gte")]
    Gte,

    /// Less than or equal, numeric
    #[serde(rename = "lte")]
    Lte,

    /// Not equal, textual
    #[serde(rename = "ne")]
    Ne,

    /// Case-insensitive containment
    #[serde(rename = "like")]
    Like,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 4] = [
        FilterOperator::Gte,
        FilterOperator::Lte,
        FilterOperator::Ne,
        FilterOperator::Like,
    ];

    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Gte => "gte",
            FilterOperator::Lte => "lte",
            FilterOperator::Ne => "ne",
            FilterOperator::Like => "like",
        }
    }

    /// Parameter suffix, including the leading underscore
    pub fn suffix(&self) -> &'static str {
        match self {
            FilterOperator::Gte => "_gte",
            FilterOperator::Lte => "_lte",
            FilterOperator::Ne => "_ne",
            FilterOperator::Like => "_like",
        }
    }

    /// Split `views_gte` into (`views`, Gte). The field part must be non-empty.
    pub fn split_key(key: &str) -> Option<(&str, FilterOperator)> {
        Self::ALL.iter().find_map(|op| {
            key.strip_suffix(op.suffix())
                .filter(|field| !field.is_empty())
                .map(|field| (field, *op))
        })
    }
}

/// Exact-match filter: the field's text must equal one of `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactFilter {
    pub field: String,
    pub values: Vec<String>,
}

impl ExactFilter {
    pub fn new(field: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            values,
        }
    }

    /// Check if a record matches this filter
    pub fn matches(&self, record: &Value) -> bool {
        let Some(actual) = lookup(record, &self.field).and_then(stringify) else {
            return false;
        };
        self.values.iter().any(|v| *v == actual)
    }
}

/// Operator filter on one field.
///
/// Several values for the same operator combine with OR, except `ne`
/// which must differ from all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl OperatorFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            values,
        }
    }

    /// Check if a record matches this filter
    ///
    /// A missing or null field differs from every value, so it passes
    /// `ne` and fails every other operator.
    pub fn matches(&self, record: &Value) -> bool {
        let field_value = lookup(record, &self.field).filter(|v| !v.is_null());

        match (self.operator, field_value) {
            (FilterOperator::Ne, None) => true,
            (_, None) => false,
            (FilterOperator::Ne, Some(actual)) => self
                .values
                .iter()
                .all(|expected| Self::test_one(self.operator, actual, expected)),
            (_, Some(actual)) => self
                .values
                .iter()
                .any(|expected| Self::test_one(self.operator, actual, expected)),
        }
    }

    fn test_one(operator: FilterOperator, actual: &Value, expected: &str) -> bool {
        match operator {
            FilterOperator::Gte => compare_numeric(actual, expected, |a, b| a >= b),
            FilterOperator::Lte => compare_numeric(actual, expected, |a, b| a <= b),
            FilterOperator::Ne => stringify(actual).is_some_and(|text| text != expected),
            FilterOperator::Like => stringify(actual)
                .is_some_and(|text| text.to_lowercase().contains(&expected.to_lowercase())),
        }
    }
}

/// Both sides are coerced to numbers; anything non-numeric never matches.
fn compare_numeric(actual: &Value, expected: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (as_number(actual), parse_number(expected)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Exact and operator filters combined with AND logic
#[derive(Debug, Clone, Default)]
pub struct FilterSet<'a> {
    pub exact: &'a [ExactFilter],
    pub operators: &'a [OperatorFilter],
}

impl FilterSet<'_> {
    pub fn matches_exact(&self, record: &Value) -> bool {
        self.exact.iter().all(|f| f.matches(record))
    }

    pub fn matches_operators(&self, record: &Value) -> bool {
        self.operators.iter().all(|f| f.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_key() {
        assert_eq!(
            FilterOperator::split_key("views_gte"),
            Some(("views", FilterOperator::Gte))
        );
        assert_eq!(
            FilterOperator::split_key("author.name_like"),
            Some(("author.name", FilterOperator::Like))
        );
        assert_eq!(FilterOperator::split_key("_ne"), None);
        assert_eq!(FilterOperator::split_key("title"), None);
    }

    #[test]
    fn test_exact_filter_is_textual() {
        let filter = ExactFilter::new("views", values(&["100"]));
        assert!(filter.matches(&json!({"views": 100})));
        assert!(filter.matches(&json!({"views": "100"})));
        assert!(!filter.matches(&json!({"views": 101})));
    }

    #[test]
    fn test_exact_filter_or_values() {
        let filter = ExactFilter::new("id", values(&["1", "2"]));
        assert!(filter.matches(&json!({"id": 1})));
        assert!(filter.matches(&json!({"id": 2})));
        assert!(!filter.matches(&json!({"id": 3})));
    }

    #[test]
    fn test_exact_filter_nested_and_missing() {
        let filter = ExactFilter::new("author.name", values(&["typicode"]));
        assert!(filter.matches(&json!({"author": {"name": "typicode"}})));
        assert!(!filter.matches(&json!({"author": {}})));
        assert!(!filter.matches(&json!({"title": "x"})));
    }

    #[test]
    fn test_gte_lte_coerce_numbers() {
        let gte = OperatorFilter::new("views", FilterOperator::Gte, values(&["150"]));
        assert!(gte.matches(&json!({"views": 250})));
        assert!(gte.matches(&json!({"views": "150"})));
        assert!(!gte.matches(&json!({"views": 100})));
        assert!(!gte.matches(&json!({"views": "lots"})));

        let lte = OperatorFilter::new("views", FilterOperator::Lte, values(&["100"]));
        assert!(lte.matches(&json!({"views": 100})));
        assert!(!lte.matches(&json!({"views": 250})));
    }

    #[test]
    fn test_ne_must_differ_from_every_value() {
        let filter = OperatorFilter::new("id", FilterOperator::Ne, values(&["1", "2"]));
        assert!(!filter.matches(&json!({"id": 1})));
        assert!(!filter.matches(&json!({"id": 2})));
        assert!(filter.matches(&json!({"id": 3})));
    }

    #[test]
    fn test_ne_keeps_missing_and_null_fields() {
        let filter = OperatorFilter::new("views", FilterOperator::Ne, values(&["100"]));
        assert!(!filter.matches(&json!({"id": 1, "views": 100})));
        assert!(filter.matches(&json!({"id": 2})));
        assert!(filter.matches(&json!({"id": 3, "views": null})));
    }

    #[test]
    fn test_like_is_case_insensitive_containment() {
        let filter = OperatorFilter::new("title", FilterOperator::Like, values(&["WORLD"]));
        assert!(filter.matches(&json!({"title": "Hello world"})));
        assert!(!filter.matches(&json!({"title": "Testing"})));
    }

    #[test]
    fn test_null_field_fails_range_and_like() {
        for operator in [FilterOperator::Gte, FilterOperator::Lte, FilterOperator::Like] {
            let filter = OperatorFilter::new("title", operator, values(&["x"]));
            assert!(!filter.matches(&json!({"title": null})));
            assert!(!filter.matches(&json!({})));
        }
    }

    #[test]
    fn test_whole_float_matches_integer_text() {
        let exact = ExactFilter::new("views", values(&["100"]));
        assert!(exact.matches(&json!({"views": 100.0})));
        assert!(exact.matches(&json!({"views": 100})));
        assert!(!exact.matches(&json!({"views": 100.5})));
    }
}
