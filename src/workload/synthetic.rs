//! Synthetic Stress Load
//!
//! A compute-bound workload for exercising the harness: performs work
//! units at a target rate for a fixed duration, bumping the progress
//! counter once per completed unit. Single-threaded, preserving the
//! counter's one-writer discipline.

use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::progress::ProgressCounter;
use crate::workload::{Workload, WorkloadResult};

/// Default work units completed per second.
pub const DEFAULT_UNITS_PER_SEC: u64 = 10;

/// Iterations of the busy-work kernel per unit.
const WORK_UNIT_ROUNDS: u32 = 10_000;

/// Paced compute-bound workload.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use stressmon::progress::ProgressCounter;
/// use stressmon::workload::{SyntheticLoad, Workload};
///
/// let mut load = SyntheticLoad::new(Duration::from_millis(100)).with_rate(50);
/// let counter = ProgressCounter::new();
/// load.run(&counter).unwrap();
/// assert!(counter.read() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticLoad {
    duration: Duration,
    units_per_sec: u64,
}

impl SyntheticLoad {
    /// Creates a load running for `duration` at the default rate.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            units_per_sec: DEFAULT_UNITS_PER_SEC,
        }
    }

    /// Sets the target number of work units per second.
    pub fn with_rate(mut self, units_per_sec: u64) -> Self {
        self.units_per_sec = units_per_sec;
        self
    }
}

impl Workload for SyntheticLoad {
    fn run(&mut self, progress: &ProgressCounter) -> WorkloadResult {
        if self.units_per_sec == 0 {
            return Err("units_per_sec must be at least 1".into());
        }

        let period = Duration::from_nanos(1_000_000_000 / self.units_per_sec);
        let started = Instant::now();
        let deadline = started + self.duration;
        let mut next_tick = started + period;

        info!(
            "Synthetic load: {:?} at {} units/sec",
            self.duration, self.units_per_sec
        );

        while Instant::now() < deadline {
            black_box(burn(WORK_UNIT_ROUNDS));
            progress.increment();

            // Sleep-paced: never ahead of schedule, a late unit just
            // starts the next one immediately.
            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
            }
            next_tick += period;
        }

        debug!(
            "Synthetic load done: {} units in {:.2?}",
            progress.read(),
            started.elapsed()
        );

        Ok(())
    }
}

/// Busy-work kernel. Returns its accumulator so callers can pass the
/// result through `black_box`, keeping the loop from being optimized
/// away.
fn burn(rounds: u32) -> f64 {
    let mut acc = 1.0f64;
    for i in 0..rounds {
        acc = (acc + i as f64).sqrt();
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_and_counts() {
        let mut load = SyntheticLoad::new(Duration::from_millis(200)).with_rate(100);
        let counter = ProgressCounter::new();

        load.run(&counter).unwrap();

        // 100/sec for 200ms targets ~20 units; generous bounds for
        // scheduling jitter.
        let units = counter.read();
        assert!(units >= 5, "too few units: {}", units);
        assert!(units <= 21, "too many units: {}", units);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let mut load = SyntheticLoad::new(Duration::from_millis(100)).with_rate(0);
        let counter = ProgressCounter::new();

        let err = load.run(&counter).unwrap_err();
        assert!(err.to_string().contains("units_per_sec"));
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_zero_duration_is_noop() {
        let mut load = SyntheticLoad::new(Duration::ZERO).with_rate(100);
        let counter = ProgressCounter::new();

        load.run(&counter).unwrap();
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_default_rate() {
        let load = SyntheticLoad::new(Duration::from_secs(1));
        assert_eq!(load.units_per_sec, DEFAULT_UNITS_PER_SEC);
    }

    #[test]
    fn test_burn_produces_finite_result() {
        let result = burn(1000);
        assert!(result.is_finite());
        assert!(result > 0.0);
    }
}
