use std::io;
use std::time::{Duration, Instant};

/// Throttled "how far through the file are we" reporting for sequential
/// reads.
///
/// A report is attempted at most once per `interval`. Producing the report
/// needs the stream's current offset; if that query fails the report is
/// skipped and the read carries on.
#[derive(Debug)]
pub struct ProgressReporter {
    label: String,
    total_size: u64,
    interval: Duration,
    last_report: Option<Instant>,
    reports: u64,
}

impl ProgressReporter {
    pub fn new(label: impl Into<String>, total_size: u64, interval: Duration) -> Self {
        Self {
            label: label.into(),
            total_size,
            interval,
            last_report: None,
            reports: 0,
        }
    }

    /// Whether a report is due at `now`. Marks the attempt when it is, so
    /// a skipped report still waits a full interval before the next try.
    pub fn due(&mut self, now: Instant) -> bool {
        let due = match self.last_report {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        };
        if due {
            self.last_report = Some(now);
        }
        due
    }

    /// Run one throttled report attempt at `now`.
    ///
    /// Returns the percentage that was logged, or `None` when no report was
    /// due, the total size is unknown, or `offset` failed.
    pub fn observe<F>(&mut self, now: Instant, offset: F) -> Option<f64>
    where
        F: FnOnce() -> io::Result<u64>,
    {
        if !self.due(now) || self.total_size == 0 {
            return None;
        }
        match offset() {
            Ok(offset) => {
                let pct = percent(offset, self.total_size);
                log::info!("{}: Read {:.2}% of the file.", self.label, pct);
                self.reports += 1;
                Some(pct)
            }
            Err(e) => {
                log::debug!("{}: skipping progress report: {}", self.label, e);
                None
            }
        }
    }

    /// Number of progress lines emitted so far.
    pub fn reports(&self) -> u64 {
        self.reports
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[inline]
fn percent(offset: u64, total: u64) -> f64 {
    (offset as f64 * 100.0) / total as f64
}
