//! # Query Parameter Parser
//!
//! Turns raw request parameters into a `QueryDescriptor`.
//!
//! Parsing never fails: malformed or out-of-range numbers are dropped
//! and the rest of the query still applies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::filter::{ExactFilter, FilterOperator, OperatorFilter};
use super::params::RawParams;

pub const SORT_PARAM: &str = "_sort";
pub const ORDER_PARAM: &str = "_order";
pub const PAGE_PARAM: &str = "_page";
pub const LIMIT_PARAM: &str = "_limit";
pub const START_PARAM: &str = "_start";
pub const END_PARAM: &str = "_end";
pub const SEARCH_PARAM: &str = "q";
pub const EMBED_PARAM: &str = "_embed";
pub const EXPAND_PARAM: &str = "_expand";

/// Keys that never turn into exact filters. `callback` and `_` are
/// JSONP artifacts some clients append.
const RESERVED_PARAMS: [&str; 11] = [
    SORT_PARAM,
    ORDER_PARAM,
    PAGE_PARAM,
    LIMIT_PARAM,
    START_PARAM,
    END_PARAM,
    SEARCH_PARAM,
    EMBED_PARAM,
    EXPAND_PARAM,
    "callback",
    "_",
];

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case is descending, anything else ascending.
    pub fn parse(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Structured form of a collection query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Exact-match filters, AND across fields, OR across values
    pub filters: Vec<ExactFilter>,

    /// `_gte`/`_lte`/`_ne`/`_like` filters
    pub operators: Vec<OperatorFilter>,

    /// Sort keys in priority order
    pub sort: Vec<SortSpec>,

    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub start: Option<usize>,
    pub end: Option<usize>,

    /// Free-text search
    pub search: Option<String>,
}

impl QueryDescriptor {
    /// Parse raw request parameters
    pub fn parse(params: &RawParams) -> Self {
        let mut exact: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut operators: BTreeMap<(String, FilterOperator), Vec<String>> = BTreeMap::new();

        for (key, values) in params.iter() {
            if RESERVED_PARAMS.contains(&key) {
                continue;
            }

            match FilterOperator::split_key(key) {
                Some((field, op)) => operators
                    .entry((field.to_string(), op))
                    .or_default()
                    .extend(values.iter().cloned()),
                None => exact
                    .entry(key.to_string())
                    .or_default()
                    .extend(values.iter().cloned()),
            }
        }

        Self {
            filters: exact
                .into_iter()
                .map(|(field, values)| ExactFilter::new(field, values))
                .collect(),
            operators: operators
                .into_iter()
                .map(|((field, op), values)| OperatorFilter::new(field, op, values))
                .collect(),
            sort: parse_sort(params),
            page: parse_positive(params.first(PAGE_PARAM)),
            limit: parse_positive(params.first(LIMIT_PARAM)),
            start: parse_non_negative(params.first(START_PARAM)),
            end: parse_non_negative(params.first(END_PARAM)),
            search: parse_search(params.first(SEARCH_PARAM)),
        }
    }

    /// Add an exact filter, merging values if the field is already filtered.
    pub fn with_filter(mut self, field: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.filters.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.values.push(value),
            None => self.filters.push(ExactFilter::new(field, vec![value])),
        }
        self
    }

    /// True when a Link header applies to the response
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() && self.limit.is_some()
    }
}

/// Split `_sort` and `_order` on commas and pair them by index.
fn parse_sort(params: &RawParams) -> Vec<SortSpec> {
    let fields = split_joined(params.all(SORT_PARAM));
    let orders = split_joined(params.all(ORDER_PARAM));

    fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| SortSpec {
            field,
            direction: orders
                .get(i)
                .map(|o| SortDirection::parse(o))
                .unwrap_or_default(),
        })
        .collect()
}

fn split_joined(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_integer(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    parse_integer(value)
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

fn parse_non_negative(value: Option<&str>) -> Option<usize> {
    parse_integer(value).and_then(|n| usize::try_from(n).ok())
}

fn parse_search(value: Option<&str>) -> Option<String> {
    value
        .filter(|q| !q.trim().is_empty())
        .map(str::to_string)
}
