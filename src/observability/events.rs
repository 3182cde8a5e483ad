//! Observable server events
//!
//! Events are explicit and typed; the logger only ever sees their
//! stable string names.

use std::fmt;

use super::logger::Severity;

/// Observable events in mockrest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    /// Configuration file loaded and merged with flags
    ConfigLoaded,
    /// Database loaded into memory
    StoreLoaded,
    /// Rewrite rules compiled
    RewriteRulesCompiled,
    /// Server startup begins
    ServerStart,
    /// Listener bound, ready for requests
    ServerListening,
    /// Startup aborted
    ServerFailed,

    // Requests
    /// A rewrite rule changed the request URL
    RequestRewritten,
    /// A rewrite produced an unparseable URI; the request kept its original one
    RequestRewriteFailed,
    /// A request was answered
    RequestComplete,
    /// A request named an unknown resource or id
    ResourceNotFound,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::RewriteRulesCompiled => "REWRITE_RULES_COMPILED",
            Event::ServerStart => "SERVER_START",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ServerFailed => "SERVER_FAILED",
            Event::RequestRewritten => "REQUEST_REWRITTEN",
            Event::RequestRewriteFailed => "REQUEST_REWRITE_FAILED",
            Event::RequestComplete => "REQUEST_COMPLETE",
            Event::ResourceNotFound => "RESOURCE_NOT_FOUND",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ServerFailed => Severity::Fatal,
            Event::ResourceNotFound | Event::RequestRewriteFailed => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
