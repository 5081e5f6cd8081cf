//! Workload Entry Points
//!
//! The seam between the harness and the code it stresses. A workload
//! is a blocking entry point that receives the run's progress counter
//! and increments it as it completes units of work; the monitor
//! samples the counter concurrently.

pub mod synthetic;

pub use synthetic::SyntheticLoad;

use crate::error::WorkloadError;
use crate::progress::ProgressCounter;

/// Outcome of a workload entry point.
pub type WorkloadResult = Result<(), WorkloadError>;

/// A blocking unit of work executed under supervision.
///
/// Implementations run to completion on the calling thread. Closures
/// with the matching signature implement this automatically:
///
/// ```rust
/// use stressmon::workload::{Workload, WorkloadResult};
/// use stressmon::progress::ProgressCounter;
///
/// let mut workload = |progress: &ProgressCounter| -> WorkloadResult {
///     progress.add(100);
///     Ok(())
/// };
///
/// let counter = ProgressCounter::new();
/// workload.run(&counter).unwrap();
/// assert_eq!(counter.read(), 100);
/// ```
pub trait Workload {
    /// Runs the workload to completion, reporting progress through
    /// `progress`.
    fn run(&mut self, progress: &ProgressCounter) -> WorkloadResult;
}

impl<F> Workload for F
where
    F: FnMut(&ProgressCounter) -> WorkloadResult,
{
    fn run(&mut self, progress: &ProgressCounter) -> WorkloadResult {
        self(progress)
    }
}
