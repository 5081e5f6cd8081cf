//! Run Progress Tracking
//!
//! Provides the shared counter a workload increments as it makes
//! progress and the monitor samples concurrently.

pub mod counter;

pub use counter::ProgressCounter;
