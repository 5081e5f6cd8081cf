//! Shared Progress Counter
//!
//! A run-scoped counter with exactly one writer (the workload loop)
//! and one reader (the monitor thread). Atomic word access makes torn
//! reads impossible; with a single writer the observed sequence is
//! non-decreasing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic progress counter shared between a workload and its monitor.
///
/// Created at run start with value zero. Cloning is cheap and yields a
/// handle to the same underlying value, so the workload and the monitor
/// thread can each hold one.
///
/// # Example
///
/// ```rust
/// use stressmon::progress::ProgressCounter;
///
/// let counter = ProgressCounter::new();
/// counter.add(10);
/// counter.increment();
/// assert_eq!(counter.read(), 11);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter {
    value: Arc<AtomicU64>,
}

impl ProgressCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `n` units of completed work.
    pub fn add(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Records one unit of completed work.
    pub fn increment(&self) {
        self.add(1);
    }

    /// Returns the most recently published value.
    ///
    /// Relaxed ordering: samples only need eventual visibility of
    /// increments, not a happens-before edge with the workload.
    pub fn read(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}
