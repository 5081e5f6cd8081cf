//! Run Supervision
//!
//! Brackets one workload execution with progress monitoring: the
//! monitor starts before the workload entry point is invoked and is
//! stopped after it returns, no matter how it returns.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};

use crate::error::{Error, Result};
use crate::monitoring::{ProgressMonitor, SampleSink};
use crate::progress::ProgressCounter;
use crate::workload::Workload;

/// Runs workloads with bracketed monitoring.
///
/// Each [`run`](Supervisor::run) owns one complete run: a fresh
/// progress counter, a monitor whose lifetime is strictly nested
/// inside the workload execution, and the workload's own outcome as
/// the run's outcome.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use stressmon::execution::Supervisor;
/// use stressmon::monitoring::shared_stdout;
/// use stressmon::workload::SyntheticLoad;
///
/// fn main() -> stressmon::Result<()> {
///     let supervisor = Supervisor::new(shared_stdout());
///     let load = SyntheticLoad::new(Duration::from_secs(10)).with_rate(50);
///     supervisor.run(load)
/// }
/// ```
pub struct Supervisor {
    monitor: ProgressMonitor,
}

impl Supervisor {
    /// Creates a supervisor emitting telemetry to `sink` at the
    /// default poll interval.
    pub fn new(sink: Arc<dyn SampleSink>) -> Self {
        Self {
            monitor: ProgressMonitor::new(sink),
        }
    }

    /// Sets the poll interval used for runs.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.monitor = self.monitor.with_interval(interval);
        self
    }

    /// Runs one workload under monitoring.
    ///
    /// Protocol, strictly ordered:
    /// 1. Create the run's progress counter at zero.
    /// 2. Start the monitor; if the thread cannot be spawned the run
    ///    aborts here and the workload is never invoked.
    /// 3. Invoke the workload's blocking entry point with the counter.
    /// 4. Stop the monitor on every exit path, including workload
    ///    panics (which are re-raised after cleanup).
    /// 5. Propagate the workload's own outcome as the run's outcome.
    pub fn run<W: Workload>(&self, mut workload: W) -> Result<()> {
        let counter = ProgressCounter::new();

        let handle = self.monitor.start(counter.clone())?;
        info!("Run started");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| workload.run(&counter)));

        let stopped = handle.stop();

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                if let Err(join_err) = &stopped {
                    error!("{}", join_err);
                }
                // The monitor is down; surface the workload panic to
                // the caller unchanged.
                panic::resume_unwind(payload);
            }
        };

        match result {
            Ok(()) => {
                stopped?;
                info!("Run completed: {} units", counter.read());
                Ok(())
            }
            Err(e) => {
                // The workload's failure is the run's outcome even if
                // the join also failed; the join failure is still
                // surfaced loudly.
                if let Err(join_err) = stopped {
                    error!("{}", join_err);
                }
                error!("Workload failed: {}", e);
                Err(Error::Workload(e))
            }
        }
    }
}
