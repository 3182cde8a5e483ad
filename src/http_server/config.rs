//! HTTP Server Configuration
//!
//! Loaded from an optional `mockrest.json`, then overridden field by
//! field from command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{ServerError, ServerResult};
use crate::store::{StoreOptions, DEFAULT_FOREIGN_KEY_SUFFIX, DEFAULT_ID_FIELD};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "mockrest.json";

/// Mock server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Identifier field of every record (default: "id")
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Appended to a singular parent name to form a foreign key (default: "Id")
    #[serde(default = "default_foreign_key_suffix")]
    pub foreign_key_suffix: String,

    /// JSON file of rewrite rules
    #[serde(default)]
    pub routes: Option<PathBuf>,

    /// Added latency per response, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Suppress per-request logs
    #[serde(default)]
    pub quiet: bool,

    /// CORS allowed origins (empty: any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_foreign_key_suffix() -> String {
    DEFAULT_FOREIGN_KEY_SUFFIX.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            id_field: default_id_field(),
            foreign_key_suffix: default_foreign_key_suffix(),
            routes: None,
            delay_ms: 0,
            quiet: false,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ServerResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ServerError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;

        let config: ServerConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load `path` if given, else `mockrest.json` if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> ServerResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.id_field.is_empty() {
            return Err(ServerError::InvalidConfig(
                "id_field must not be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(ServerError::InvalidConfig("port must be > 0".to_string()));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Naming conventions handed to the store
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            id_field: self.id_field.clone(),
            foreign_key_suffix: self.foreign_key_suffix.clone(),
        }
    }

    /// Response delay, if any
    pub fn delay(&self) -> Option<Duration> {
        (self.delay_ms > 0).then(|| Duration::from_millis(self.delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3000);
        assert_eq!(config.id_field, "id");
        assert_eq!(config.foreign_key_suffix, "Id");
        assert!(config.routes.is_none());
        assert!(config.delay().is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "localhost:8080");
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let file = write_config(r#"{"port": 4000, "id_field": "_id", "delay_ms": 50}"#);
        let config = ServerConfig::load(file.path()).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.id_field, "_id");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.delay(), Some(Duration::from_millis(50)));
        assert_eq!(config.store_options().id_field, "_id");
    }

    #[test]
    fn test_load_rejects_empty_id_field() {
        let file = write_config(r#"{"id_field": ""}"#);
        let err = ServerConfig::load(file.path()).unwrap_err();
        assert_eq!(err.code(), "MOCKREST_CONFIG_INVALID");
    }

    #[test]
    fn test_load_rejects_port_zero() {
        let file = write_config(r#"{"port": 0}"#);
        assert!(matches!(
            ServerConfig::load(file.path()),
            Err(ServerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_config("{not json");
        assert!(matches!(
            ServerConfig::load(file.path()),
            Err(ServerError::ConfigJson(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServerConfig::load(Path::new("/nonexistent/mockrest.json")).unwrap_err();
        assert_eq!(err.code(), "MOCKREST_CONFIG_IO");
    }
}
