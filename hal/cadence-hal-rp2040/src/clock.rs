//! Clock backed by the embassy time driver

use cadence_hal::Clock;
use embassy_time::Instant;

/// Milliseconds since this clock was created
pub struct EmbassyClock {
    start: Instant,
}

impl EmbassyClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for EmbassyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation wraps the counter after ~49 days
        self.start.elapsed().as_millis() as u32
    }
}
