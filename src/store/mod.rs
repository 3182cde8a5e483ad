//! # Record Store Interface
//!
//! The engines read collections through the `Storage` trait. Creation,
//! updates, persistence and id generation belong to the implementor;
//! `MemoryStore` is the read-only implementation the server ships with.

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryStore, StoreOptions, DEFAULT_FOREIGN_KEY_SUFFIX, DEFAULT_ID_FIELD};

use serde_json::Value;

use crate::record::Identifier;

/// A named resource: a sequence of records or one record
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Collection(Vec<Value>),
    Singular(Value),
}

impl Resource {
    /// Classify a stored value by whether it is a sequence.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(records) => Resource::Collection(records),
            other => Resource::Singular(other),
        }
    }

    /// Records of a collection; a singular resource has none.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Resource::Collection(records) => records,
            Resource::Singular(_) => Vec::new(),
        }
    }
}

/// Read access to named resources
pub trait Storage: Send + Sync {
    /// Fetch a resource by name
    fn resource(&self, name: &str) -> Option<Resource>;

    /// True if `name` holds a sequence of records
    fn is_collection(&self, name: &str) -> bool {
        matches!(self.resource(name), Some(Resource::Collection(_)))
    }

    /// Find one record of a collection by coercive id comparison
    fn get_by_id(&self, name: &str, id: &Identifier) -> Option<Value>;

    /// Name of the identifier field
    fn id_field(&self) -> &str;

    /// Suffix appended to a singular parent name to form a foreign key
    fn foreign_key_suffix(&self) -> &str;
}
