//! Rewrite rule errors
//!
//! Only compiling or loading a rule set can fail. Applying a compiled
//! rule set to a request never does.

use thiserror::Error;

/// Result type for rule compilation
pub type RewriteResult<T> = Result<T, RewriteError>;

/// Rule-set compilation errors
#[derive(Debug, Error)]
pub enum RewriteError {
    /// A rule maps to something other than a string
    #[error("Rewrite rule \"{pattern}\" must map to a string, found {found}")]
    NonTextualTarget { pattern: String, found: &'static str },

    /// The rule set itself is not a JSON object
    #[error("Rewrite rules must be a JSON object of pattern to target, found {0}")]
    InvalidRuleSet(&'static str),

    /// A pattern produced an invalid matcher
    #[error("Invalid rewrite pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Rules file could not be read
    #[error("Failed to read rewrite rules {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rules file is not valid JSON
    #[error("Invalid rewrite rules JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl RewriteError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RewriteError::NonTextualTarget { .. } => "MOCKREST_REWRITE_NON_TEXTUAL_TARGET",
            RewriteError::InvalidRuleSet(_) => "MOCKREST_REWRITE_INVALID_RULE_SET",
            RewriteError::InvalidPattern { .. } => "MOCKREST_REWRITE_INVALID_PATTERN",
            RewriteError::Io { .. } => "MOCKREST_REWRITE_IO",
            RewriteError::InvalidJson(_) => "MOCKREST_REWRITE_INVALID_JSON",
        }
    }
}
