//! # Query Engine
//!
//! Turns request parameters into a `QueryDescriptor` and applies it to a
//! collection: search, exact filters, operator filters, sort, window.
//! Also builds the pagination `Link` header.
//!
//! Nothing in this module fails. Bad numeric parameters are dropped and
//! the rest of the query still runs.

mod descriptor;
mod engine;
mod filter;
mod links;
mod params;
mod sorter;
mod window;

pub use descriptor::{
    QueryDescriptor, SortDirection, SortSpec, EMBED_PARAM, END_PARAM, EXPAND_PARAM, LIMIT_PARAM,
    ORDER_PARAM, PAGE_PARAM, SEARCH_PARAM, SORT_PARAM, START_PARAM,
};
pub use engine::{apply_query, QueryOutput};
pub use filter::{ExactFilter, FilterOperator, FilterSet, OperatorFilter};
pub use links::{build_link_header, LINK_HEADER, TOTAL_COUNT_HEADER};
pub use params::RawParams;
pub use sorter::ResultSorter;
pub use window::Window;

/// Parse raw request parameters into a query description.
pub fn parse_query(params: &RawParams) -> QueryDescriptor {
    QueryDescriptor::parse(params)
}

pub(crate) use params::decode_pairs;
