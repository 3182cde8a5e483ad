//! Query execution over an in-memory collection
//!
//! # Execution Flow (strict order)
//!
//! 1. Free-text search
//! 2. Exact filters
//! 3. Operator filters
//! 4. Capture `total`
//! 5. Sort
//! 6. Window

use serde::Serialize;
use serde_json::Value;

use super::descriptor::QueryDescriptor;
use super::filter::FilterSet;
use super::sorter::ResultSorter;
use super::window::Window;
use crate::record::contains_text;

/// Result of running a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutput {
    /// Records inside the window
    pub records: Vec<Value>,

    /// Matching records before windowing
    pub total: usize,
}

/// Run `query` against a collection's records.
pub fn apply_query(records: Vec<Value>, query: &QueryDescriptor) -> QueryOutput {
    let needle = query.search.as_ref().map(|q| q.to_lowercase());
    let filters = FilterSet {
        exact: &query.filters,
        operators: &query.operators,
    };

    let mut matched: Vec<Value> = records
        .into_iter()
        .filter(|r| needle.as_deref().map_or(true, |n| contains_text(r, n)))
        .filter(|r| filters.matches_exact(r))
        .filter(|r| filters.matches_operators(r))
        .collect();

    let total = matched.len();

    ResultSorter::sort(&mut matched, &query.sort);

    QueryOutput {
        records: Window::of(query).apply(matched),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{RawParams, SortSpec};
    use serde_json::json;

    fn posts() -> Vec<Value> {
        vec![
            json!({"id": 1, "title": "Hello World", "views": 100}),
            json!({"id": 2, "title": "Testing", "views": 250}),
        ]
    }

    fn parse(pairs: &[(&str, &str)]) -> QueryDescriptor {
        QueryDescriptor::parse(&RawParams::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_operator_filter_and_sort() {
        let query = parse(&[("views_gte", "150"), ("_sort", "views"), ("_order", "desc")]);
        let output = apply_query(posts(), &query);

        assert_eq!(output.total, 1);
        assert_eq!(output.records, vec![posts()[1].clone()]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let output = apply_query(posts(), &parse(&[("q", "hello")]));
        assert_eq!(output.total, 1);
        assert_eq!(output.records[0]["id"], 1);
    }

    #[test]
    fn test_total_ignores_window() {
        let records: Vec<Value> = (1..=25).map(|i| json!({"id": i})).collect();

        let output = apply_query(records.clone(), &parse(&[("_page", "2"), ("_limit", "10")]));
        assert_eq!(output.total, 25);
        assert_eq!(output.records.len(), 10);
        assert_eq!(output.records[0]["id"], 11);

        let output = apply_query(records, &parse(&[("_start", "20"), ("_end", "30")]));
        assert_eq!(output.total, 25);
        assert_eq!(output.records.len(), 5);
    }

    #[test]
    fn test_exact_filters_or_values() {
        let output = apply_query(posts(), &parse(&[("id", "1"), ("id", "2"), ("title", "Testing")]));
        assert_eq!(output.total, 1);
        assert_eq!(output.records[0]["id"], 2);
    }

    #[test]
    fn test_no_parameters_returns_everything() {
        let output = apply_query(posts(), &QueryDescriptor::default());
        assert_eq!(output.records, posts());
        assert_eq!(output.total, 2);
    }

    #[test]
    fn test_multi_key_sort() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"a": 1, "b": 1})];
        let query = QueryDescriptor {
            sort: vec![SortSpec::asc("a"), SortSpec::asc("b")],
            ..Default::default()
        };

        let output = apply_query(records, &query);
        assert_eq!(output.records[0]["b"], 1);
    }
}
