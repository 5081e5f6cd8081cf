//! Progress Monitoring Module
//!
//! Provides the background sampler that reads a run's progress counter
//! once per poll interval and the sink abstraction its telemetry lines
//! are written through.
//!
//! # Components
//!
//! - [`ProgressMonitor`] / [`MonitorHandle`]: background sampling thread
//!   with cooperative cancellation
//! - [`SampleRecord`]: one timestamped sample, wire format included
//! - [`SampleSink`]: synchronized line-oriented output destination

pub mod sampler;
pub mod sink;

pub use sampler::{MonitorHandle, ProgressMonitor, SampleRecord, DEFAULT_SAMPLE_INTERVAL};
pub use sink::{shared_stdout, MemorySink, SampleSink, StdoutSink};
