//! Observability for mockrest
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and request events
//! - Request latency timing
//!
//! Logging is read-only: it never changes what a request returns.
//!
//! # Usage
//!
//! ```ignore
//! use mockrest::observability::{log_event_with_fields, Event, Timer};
//!
//! let timer = Timer::new();
//! // ... answer request ...
//! log_event_with_fields(Event::RequestComplete, &[("ms", &timer.elapsed_ms())]);
//! ```

mod events;
mod logger;
mod timer;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use timer::Timer;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
