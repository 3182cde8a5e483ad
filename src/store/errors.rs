//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading a database
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database file could not be read
    #[error("Failed to read database file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Database file is not valid JSON
    #[error("Invalid database JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Root value is not an object of named resources
    #[error("Database root must be an object of named resources, found {0}")]
    InvalidRoot(&'static str),
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "MOCKREST_STORE_IO",
            StoreError::InvalidJson(_) => "MOCKREST_STORE_INVALID_JSON",
            StoreError::InvalidRoot(_) => "MOCKREST_STORE_INVALID_ROOT",
        }
    }
}
