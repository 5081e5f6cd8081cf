//! Stressmon - Stress Workload Harness with Progress Telemetry
//!
//! Runs a blocking stress workload with a background monitor that
//! samples the workload's progress counter once per poll interval and
//! writes timestamped lines to a shared output sink. The monitor's
//! lifetime is strictly nested inside the workload execution: it
//! starts before the workload entry point is invoked and is stopped
//! after it returns, on every exit path.
//!
//! # Architecture
//!
//! The library is organized into five main modules:
//!
//! - [`progress`]: the shared counter a workload increments as it works
//! - [`monitoring`]: the background sampler and the output sink
//! - [`workload`]: the workload entry-point seam and a synthetic load
//! - [`execution`]: run supervision bracketing workload and monitor
//! - [`config`]: YAML run configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use stressmon::execution::Supervisor;
//! use stressmon::monitoring::shared_stdout;
//! use stressmon::workload::SyntheticLoad;
//!
//! fn main() -> stressmon::Result<()> {
//!     let supervisor = Supervisor::new(shared_stdout());
//!     let load = SyntheticLoad::new(Duration::from_secs(30)).with_rate(50);
//!
//!     supervisor.run(load)
//! }
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod monitoring;
pub mod progress;
pub mod workload;

// Re-export commonly used types
pub use config::HarnessConfig;
pub use error::{Error, Result, WorkloadError};
pub use execution::Supervisor;
pub use monitoring::{MonitorHandle, ProgressMonitor, SampleRecord, SampleSink};
pub use progress::ProgressCounter;
pub use workload::{SyntheticLoad, Workload, WorkloadResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "stressmon";
