//! Background Progress Sampler
//!
//! Periodically reads a run's progress counter and writes one
//! timestamped line per poll interval to the output sink, until
//! stopped. Cancellation is cooperative: the sampler observes the
//! stop signal at its wait boundary and exits on its own, so it is
//! never killed mid-write.

use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::monitoring::sink::SampleSink;
use crate::progress::ProgressCounter;

/// Default time between progress samples.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// A single timestamped progress sample.
///
/// Produced once per poll interval and written to the sink immediately,
/// never stored. The display form is the line format external log
/// collectors consume:
///
/// ```text
/// Time <seconds since epoch>, counter=<value>
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRecord {
    /// Seconds since the Unix epoch at capture time.
    pub timestamp: i64,
    /// Counter value observed at capture time.
    pub value: u64,
}

impl fmt::Display for SampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time {}, counter={}", self.timestamp, self.value)
    }
}

/// Configures and starts background sampling of a progress counter.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use stressmon::monitoring::{MemorySink, ProgressMonitor};
/// use stressmon::progress::ProgressCounter;
///
/// fn main() -> stressmon::Result<()> {
///     let sink = Arc::new(MemorySink::new());
///     let monitor = ProgressMonitor::new(sink).with_interval(Duration::from_millis(50));
///
///     let counter = ProgressCounter::new();
///     let handle = monitor.start(counter.clone())?;
///     counter.add(42);
///     handle.stop()
/// }
/// ```
pub struct ProgressMonitor {
    interval: Duration,
    sink: Arc<dyn SampleSink>,
    #[cfg(test)]
    fail_start: bool,
}

impl ProgressMonitor {
    /// Creates a monitor writing to `sink` at the default interval.
    pub fn new(sink: Arc<dyn SampleSink>) -> Self {
        Self {
            interval: DEFAULT_SAMPLE_INTERVAL,
            sink,
            #[cfg(test)]
            fail_start: false,
        }
    }

    /// Sets the time between samples.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Monitor whose `start` fails as if thread resources were exhausted.
    #[cfg(test)]
    pub(crate) fn failing(sink: Arc<dyn SampleSink>) -> Self {
        Self {
            interval: DEFAULT_SAMPLE_INTERVAL,
            sink,
            fail_start: true,
        }
    }

    /// Spawns the background sampling thread for `counter`.
    ///
    /// Returns [`Error::MonitorSpawn`] if the thread cannot be spawned
    /// (resource exhaustion); callers must treat that as fatal for the
    /// run rather than proceeding without telemetry.
    pub fn start(&self, counter: ProgressCounter) -> Result<MonitorHandle> {
        #[cfg(test)]
        {
            if self.fail_start {
                return Err(Error::MonitorSpawn(std::io::Error::new(
                    std::io::ErrorKind::OutOfMemory,
                    "simulated spawn failure",
                )));
            }
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let interval = self.interval;
        let sink = Arc::clone(&self.sink);

        let thread = thread::Builder::new()
            .name("progress-monitor".to_string())
            .spawn(move || sample_loop(counter, interval, sink, stop_rx))
            .map_err(Error::MonitorSpawn)?;

        debug!("Monitor started (interval: {:?})", interval);

        Ok(MonitorHandle { stop_tx, thread })
    }
}

/// Handle to a running sampler.
///
/// Exactly one exists per run. [`stop`](MonitorHandle::stop) consumes
/// the handle, so a monitor can only be stopped once. Dropping the
/// handle without stopping also ends the sampler (the stop channel
/// disconnects at its next wake-up) but does not wait for it.
pub struct MonitorHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl MonitorHandle {
    /// Requests cancellation and blocks until the sampler terminates.
    ///
    /// The stop signal interrupts the interval wait, so this normally
    /// returns within milliseconds and never later than one interval.
    /// After it returns the sink receives no further writes from this
    /// handle.
    ///
    /// Returns [`Error::MonitorJoin`] if the sampler thread panicked;
    /// that signals a defect in the sampler, not a runtime condition.
    pub fn stop(self) -> Result<()> {
        // A failed send means the sampler already exited; join() below
        // reports whether that exit was a panic.
        let _ = self.stop_tx.send(());

        self.thread.join().map_err(|_| Error::MonitorJoin)?;
        debug!("Monitor stopped");
        Ok(())
    }
}

/// Sampler thread body: wait out the interval (or a stop signal), then
/// capture and emit one sample.
fn sample_loop(
    counter: ProgressCounter,
    interval: Duration,
    sink: Arc<dyn SampleSink>,
    stop_rx: Receiver<()>,
) {
    loop {
        match stop_rx.recv_timeout(interval) {
            // Stop requested, or the handle was dropped. No further
            // samples may be written either way.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let record = SampleRecord {
            timestamp: Utc::now().timestamp(),
            value: counter.read(),
        };

        if let Err(e) = sink.write_line(&record.to_string()) {
            // Telemetry loss does not end the run; keep sampling.
            warn!("Failed to write sample: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::sink::MemorySink;
    use std::time::Instant;

    const TEST_INTERVAL: Duration = Duration::from_millis(50);

    fn parse_value(line: &str) -> u64 {
        line.rsplit("counter=")
            .next()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| panic!("bad sample line: {:?}", line))
    }

    fn parse_timestamp(line: &str) -> i64 {
        line.strip_prefix("Time ")
            .and_then(|rest| rest.split(',').next())
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| panic!("bad sample line: {:?}", line))
    }

    #[test]
    fn test_sample_record_format() {
        let record = SampleRecord {
            timestamp: 1700000000,
            value: 42,
        };
        assert_eq!(record.to_string(), "Time 1700000000, counter=42");
    }

    #[test]
    fn test_emits_one_line_per_interval() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::new(sink.clone()).with_interval(TEST_INTERVAL);

        let handle = monitor.start(ProgressCounter::new()).unwrap();
        thread::sleep(TEST_INTERVAL * 3 + TEST_INTERVAL / 2);
        handle.stop().unwrap();

        // floor(3.5 intervals / interval) = 3, with scheduling tolerance
        let count = sink.len();
        assert!((2..=4).contains(&count), "unexpected sample count: {}", count);
    }

    #[test]
    fn test_no_output_after_stop() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::new(sink.clone()).with_interval(TEST_INTERVAL);

        let handle = monitor.start(ProgressCounter::new()).unwrap();
        thread::sleep(TEST_INTERVAL * 2);
        handle.stop().unwrap();

        let count = sink.len();
        thread::sleep(TEST_INTERVAL * 3);
        assert_eq!(sink.len(), count, "sampler wrote after stop");
    }

    #[test]
    fn test_samples_reflect_counter_value() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::new(sink.clone()).with_interval(TEST_INTERVAL);

        let counter = ProgressCounter::new();
        counter.add(5);

        let handle = monitor.start(counter).unwrap();
        thread::sleep(TEST_INTERVAL * 2 + TEST_INTERVAL / 2);
        handle.stop().unwrap();

        let lines = sink.lines();
        assert!(!lines.is_empty());
        for line in lines {
            assert_eq!(parse_value(&line), 5);
        }
    }

    #[test]
    fn test_sampled_values_non_decreasing() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::new(sink.clone()).with_interval(Duration::from_millis(20));

        let counter = ProgressCounter::new();
        let handle = monitor.start(counter.clone()).unwrap();

        for _ in 0..10 {
            counter.add(3);
            thread::sleep(Duration::from_millis(10));
        }
        handle.stop().unwrap();

        let values: Vec<u64> = sink.lines().iter().map(|l| parse_value(l)).collect();
        assert!(!values.is_empty());
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "values decreased: {:?}", values);
        }
    }

    #[test]
    fn test_stop_interrupts_interval_wait() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::new(sink).with_interval(Duration::from_secs(5));

        let handle = monitor.start(ProgressCounter::new()).unwrap();

        let started = Instant::now();
        handle.stop().unwrap();

        // The stop signal must wake the sampler out of its 5s wait.
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_timestamps_are_wall_clock() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::new(sink.clone()).with_interval(TEST_INTERVAL);

        let before = Utc::now().timestamp();
        let handle = monitor.start(ProgressCounter::new()).unwrap();
        thread::sleep(TEST_INTERVAL * 2 + TEST_INTERVAL / 2);
        handle.stop().unwrap();
        let after = Utc::now().timestamp();

        for line in sink.lines() {
            let ts = parse_timestamp(&line);
            assert!(ts >= before - 1 && ts <= after + 1, "timestamp off: {}", ts);
        }
    }

    #[test]
    fn test_start_failure_injected() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::failing(sink.clone());

        let result = monitor.start(ProgressCounter::new());
        assert!(matches!(result, Err(Error::MonitorSpawn(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_dropped_handle_ends_sampler() {
        let sink = Arc::new(MemorySink::new());
        let monitor = ProgressMonitor::new(sink.clone()).with_interval(TEST_INTERVAL);

        let handle = monitor.start(ProgressCounter::new()).unwrap();
        drop(handle);

        // The sampler notices the disconnected channel at its next
        // wake-up and exits without emitting.
        thread::sleep(TEST_INTERVAL * 3);
        let count = sink.len();
        thread::sleep(TEST_INTERVAL * 3);
        assert_eq!(sink.len(), count);
    }
}
