//! Request latency timer

use std::time::Instant;

/// A simple duration timer for logging elapsed time
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds with three decimals, e.g. `"1.234"`
    pub fn elapsed_ms(&self) -> String {
        format!("{:.3}", self.start.elapsed().as_secs_f64() * 1000.0)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
