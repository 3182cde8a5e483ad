//! Result sorting for collection queries
//!
//! Multi-key, stable sort over JSON records.

use std::cmp::Ordering;

use serde_json::Value;

use super::descriptor::{SortDirection, SortSpec};
use crate::record::lookup;

/// Sorts records
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts records by every key in `specs`, in priority order.
    ///
    /// Sort is stable. Records missing a key (or holding null) sort after
    /// records that define it, whatever the direction; ties fall through
    /// to the next key.
    pub fn sort(records: &mut [Value], specs: &[SortSpec]) {
        if specs.is_empty() {
            return;
        }

        records.sort_by(|a, b| {
            specs
                .iter()
                .map(|spec| Self::compare_key(a, b, spec))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    fn compare_key(a: &Value, b: &Value, spec: &SortSpec) -> Ordering {
        let a_val = lookup(a, &spec.field).filter(|v| !v.is_null());
        let b_val = lookup(b, &spec.field).filter(|v| !v.is_null());

        match (a_val, b_val) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a_val), Some(b_val)) => {
                let ordering = Self::compare_values(a_val, b_val);
                match spec.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }

    /// Compares two defined JSON values.
    ///
    /// Ordering rules:
    /// - bool < number < string < array < object
    /// - For same types, natural ordering
    fn compare_values(a: &Value, b: &Value) -> Ordering {
        let type_order = |v: &Value| -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Number(_) => 2,
                Value::String(_) => 3,
                Value::Array(_) => 4,
                Value::Object(_) => 5,
            }
        };

        match (a, b) {
            (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
            (Value::Number(a_n), Value::Number(b_n)) => {
                let a_f = a_n.as_f64().unwrap_or(0.0);
                let b_f = b_n.as_f64().unwrap_or(0.0);
                a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
            }
            (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
            _ => type_order(a).cmp(&type_order(b)),
        }
    }
}
