//! Time utilities for the host tick loop

use std::time::{Duration, Instant};

/// Host tick length, never shorter than one millisecond
pub fn host_tick_duration(millis: u64) -> Duration {
    Duration::from_millis(millis.max(1))
}

/// Number of host ticks covering `units` time units
pub fn units_to_ticks(units: u32, ticks_per_unit: u32) -> u64 {
    u64::from(units) * u64::from(ticks_per_unit.max(1))
}

/// A simple stopwatch for measuring wall-clock durations
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_tick_duration_floor() {
        assert_eq!(host_tick_duration(0), Duration::from_millis(1));
        assert_eq!(host_tick_duration(50), Duration::from_millis(50));
    }

    #[test]
    fn test_units_to_ticks() {
        assert_eq!(units_to_ticks(10, 20), 200);
        assert_eq!(units_to_ticks(3, 0), 3);
    }
}
