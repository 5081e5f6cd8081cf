//! Error types for harness runs.

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Boxed error type returned by workload entry points.
pub type WorkloadError = Box<dyn StdError + Send + Sync>;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a monitored workload.
#[derive(Error, Debug)]
pub enum Error {
    /// The monitor thread could not be spawned.
    ///
    /// Fatal for the run: the workload is never invoked, so no work
    /// executes unobserved.
    #[error("failed to spawn monitor thread: {0}")]
    MonitorSpawn(#[source] io::Error),

    /// The workload itself reported failure.
    ///
    /// The monitor is stopped cleanly before this is propagated as
    /// the run's outcome.
    #[error("workload failed: {0}")]
    Workload(#[source] WorkloadError),

    /// The monitor thread could not be joined because it panicked.
    ///
    /// Indicates a defect in the monitor itself, not a recoverable
    /// runtime condition.
    #[error("monitor thread panicked before it could be joined")]
    MonitorJoin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_spawn_display() {
        let err = Error::MonitorSpawn(io::Error::new(
            io::ErrorKind::OutOfMemory,
            "no threads left",
        ));
        let msg = err.to_string();
        assert!(msg.contains("spawn monitor thread"));
        assert!(msg.contains("no threads left"));
    }

    #[test]
    fn test_workload_display() {
        let err = Error::Workload("disk full".into());
        assert_eq!(err.to_string(), "workload failed: disk full");
    }

    #[test]
    fn test_monitor_join_display() {
        let err = Error::MonitorJoin;
        assert!(err.to_string().contains("panicked"));
    }

    #[test]
    fn test_workload_source_preserved() {
        use std::error::Error as _;

        let err = Error::Workload("underlying cause".into());
        let source = err.source().expect("workload error keeps its source");
        assert_eq!(source.to_string(), "underlying cause");
    }
}
