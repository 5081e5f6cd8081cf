//! Run Execution Module
//!
//! Provides the supervisor that brackets one workload execution with
//! progress monitoring: start the monitor, invoke the workload, stop
//! the monitor on every exit path, propagate the workload's outcome.

pub mod supervisor;

pub use supervisor::Supervisor;
