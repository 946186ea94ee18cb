//! Wall-clock timing for tracked operations

use std::time::{Duration, Instant};

/// Timer started when a tracked operation begins
#[derive(Debug, Clone)]
pub struct OperationTimer {
    name: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Start timing the operation `name`
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        log::trace!("timing {}", name);
        Self {
            name,
            start_time: Instant::now(),
        }
    }

    /// Time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in fractional milliseconds, microsecond resolution
    pub fn elapsed_millis_f64(&self) -> f64 {
        let ms = self.elapsed().as_micros() as f64 / 1_000.0;
        log::trace!("{} finished after {:.3} ms", self.name, ms);
        ms
    }
}
