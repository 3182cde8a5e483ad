//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::io;

use thiserror::Error;

use crate::http_server::ServerError;
use crate::rewrite::RewriteError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or flag error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Database or rewrite rules failed to load
    LoadFailed,
    /// Server failed to start
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "MOCKREST_CLI_CONFIG_ERROR",
            Self::IoError => "MOCKREST_CLI_IO_ERROR",
            Self::LoadFailed => "MOCKREST_CLI_LOAD_FAILED",
            Self::BootFailed => "MOCKREST_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {}", .code.code(), .message)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::LoadFailed, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<RewriteError> for CliError {
    fn from(e: RewriteError) -> Self {
        Self::load_failed(format!("{} ({})", e, e.code()))
    }
}

impl From<ServerError> for CliError {
    fn from(e: ServerError) -> Self {
        let message = format!("{} ({})", e, e.code());
        match e {
            ServerError::ConfigIo { .. }
            | ServerError::ConfigJson(_)
            | ServerError::InvalidConfig(_) => Self::config_error(message),
            ServerError::Store(_) | ServerError::Rewrite(_) => Self::load_failed(message),
            ServerError::Bind { .. } | ServerError::Serve(_) => Self::boot_failed(message),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::config_error("port must be > 0");
        assert_eq!(err.to_string(), "MOCKREST_CLI_CONFIG_ERROR: port must be > 0");
    }

    #[test]
    fn test_server_error_mapping() {
        let err = CliError::from(ServerError::InvalidConfig("x".to_string()));
        assert_eq!(err.code(), CliErrorCode::ConfigError);

        let err = CliError::from(ServerError::Rewrite(RewriteError::InvalidRuleSet("array")));
        assert_eq!(err.code(), CliErrorCode::LoadFailed);
    }
}
