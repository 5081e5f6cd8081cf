//! Sample Output Sink
//!
//! Destination for telemetry lines. Sinks write whole lines and flush
//! them immediately, so consumers tailing the output see near-real-time
//! data and lines from concurrent runs never interleave mid-line.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

/// Where monitor sample lines are written.
///
/// Implementations must write the full line atomically with respect to
/// other callers and flush before returning.
pub trait SampleSink: Send + Sync {
    /// Writes one line (without trailing newline) and flushes it.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Sink writing to the process's standard output.
///
/// The stdout handle lock is held across write and flush, so monitors
/// from concurrent runs emit whole lines.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    /// Creates a stdout sink.
    pub fn new() -> Self {
        Self
    }
}

impl SampleSink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)?;
        out.flush()
    }
}

/// Returns the process-wide stdout sink shared by all concurrent runs.
pub fn shared_stdout() -> Arc<dyn SampleSink> {
    static SINK: Lazy<Arc<dyn SampleSink>> = Lazy::new(|| Arc::new(StdoutSink::new()));
    Arc::clone(&SINK)
}

/// In-memory sink collecting lines for inspection.
///
/// Used by tests and embedders that want to capture telemetry instead
/// of printing it.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns how many lines have been written.
    pub fn len(&self) -> usize {
        self.lines().len()
    }

    /// Returns true if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SampleSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "sink lock poisoned"))?;
        lines.push(line.to_string());
        Ok(())
    }
}
