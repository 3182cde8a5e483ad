//! Record model shared by the engines
//!
//! Records are plain `serde_json::Value` objects. This module supplies
//! the typed identifier and the recursive field accessors the query
//! engine and relationship resolver are built on.

mod access;
mod identifier;

pub use access::{
    as_number, contains_text, lookup, number_text, parse_number, stringify, type_name,
};
pub use identifier::Identifier;
