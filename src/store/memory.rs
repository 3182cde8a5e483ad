//! In-memory JSON database

use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard};

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::{Resource, Storage};
use crate::record::{type_name, Identifier};

pub const DEFAULT_ID_FIELD: &str = "id";
pub const DEFAULT_FOREIGN_KEY_SUFFIX: &str = "Id";

/// Naming conventions the store exposes to the engines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub id_field: String,
    pub foreign_key_suffix: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            foreign_key_suffix: DEFAULT_FOREIGN_KEY_SUFFIX.to_string(),
        }
    }
}

/// A database of named resources held in memory.
///
/// Readers share the lock; the engines only ever receive clones.
pub struct MemoryStore {
    data: RwLock<Map<String, Value>>,
    options: StoreOptions,
}

impl MemoryStore {
    /// Build a store from a JSON object of named resources.
    pub fn from_value(root: Value, options: StoreOptions) -> StoreResult<Self> {
        match root {
            Value::Object(data) => Ok(Self {
                data: RwLock::new(data),
                options,
            }),
            other => Err(StoreError::InvalidRoot(type_name(&other))),
        }
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path, options: StoreOptions) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let root: Value = serde_json::from_str(&content)?;
        Self::from_value(root, options)
    }

    /// The whole database as one JSON object.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.read().clone())
    }

    /// Resource names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // A poisoned lock still holds a consistent map: nothing writes
    // through it after construction.
    fn read(&self) -> RwLockReadGuard<'_, Map<String, Value>> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStore {
    fn resource(&self, name: &str) -> Option<Resource> {
        self.read().get(name).cloned().map(Resource::from_value)
    }

    fn is_collection(&self, name: &str) -> bool {
        self.read().get(name).is_some_and(Value::is_array)
    }

    fn get_by_id(&self, name: &str, id: &Identifier) -> Option<Value> {
        let data = self.read();
        let records = data.get(name)?.as_array()?;
        records
            .iter()
            .find(|r| r.get(&self.options.id_field).is_some_and(|v| id.matches(v)))
            .cloned()
    }

    fn id_field(&self) -> &str {
        &self.options.id_field
    }

    fn foreign_key_suffix(&self) -> &str {
        &self.options.foreign_key_suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> MemoryStore {
        MemoryStore::from_value(
            json!({
                "posts": [{"id": 1, "title": "a"}, {"id": "x2", "title": "b"}],
                "profile": {"name": "typicode"}
            }),
            StoreOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_resources() {
        let store = sample();
        assert!(store.is_collection("posts"));
        assert!(!store.is_collection("profile"));
        assert!(!store.is_collection("missing"));
        assert!(matches!(store.resource("profile"), Some(Resource::Singular(_))));
        assert!(store.resource("missing").is_none());
        assert_eq!(store.names(), vec!["posts", "profile"]);
    }

    #[test]
    fn test_get_by_id_is_coercive() {
        let store = sample();
        let found = store.get_by_id("posts", &Identifier::from_text("1")).unwrap();
        assert_eq!(found["title"], "a");
        assert!(store.get_by_id("posts", &Identifier::from_text("x2")).is_some());
        assert!(store.get_by_id("posts", &Identifier::from_text("3")).is_none());
        assert!(store.get_by_id("profile", &Identifier::from_text("1")).is_none());
    }

    #[test]
    fn test_custom_id_field() {
        let store = MemoryStore::from_value(
            json!({"users": [{"_id": 5}]}),
            StoreOptions {
                id_field: "_id".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(store.get_by_id("users", &Identifier::from_text("5")).is_some());
        assert_eq!(store.id_field(), "_id");
        assert_eq!(store.foreign_key_suffix(), "Id");
    }

    #[test]
    fn test_invalid_root() {
        let result = MemoryStore::from_value(json!([1, 2]), StoreOptions::default());
        assert!(matches!(result, Err(StoreError::InvalidRoot("array"))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"comments": [{{"id": 1, "postId": 1}}]}}"#).unwrap();

        let store = MemoryStore::load(file.path(), StoreOptions::default()).unwrap();
        assert!(store.is_collection("comments"));
        assert_eq!(store.snapshot()["comments"][0]["postId"], 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = MemoryStore::load(Path::new("/nonexistent/db.json"), StoreOptions::default());
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
