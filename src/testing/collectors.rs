//! In-memory collectors for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::ErrorKind;
use crate::transport::{Collector, SendFuture};
use crate::types::TraceReport;
use crate::{AppKey, Error};

/// A report as received by [`RecordingCollector`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedReport {
    /// The app key the report was sent with.
    pub app_key: String,

    /// The report body.
    pub report: TraceReport,
}

/// A collector that records reports instead of sending them.
///
/// ## Example
///
/// ```rust
/// use zigmond::testing::RecordingCollector;
///
/// let collector = RecordingCollector::new();
/// assert!(collector.reports().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct RecordingCollector {
    reports: Arc<Mutex<Vec<RecordedReport>>>,
    delay: Option<Duration>,
}

impl RecordingCollector {
    /// Creates an empty recording collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits `delay` before recording each report.
    ///
    /// Useful with paused tokio time to exercise the delivery timeout.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns every report recorded so far, oldest first.
    pub fn reports(&self) -> Vec<RecordedReport> {
        self.reports.lock().clone()
    }

    /// Returns the number of reports recorded.
    pub fn count(&self) -> usize {
        self.reports.lock().len()
    }

    /// Forgets all recorded reports.
    pub fn clear(&self) {
        self.reports.lock().clear();
    }
}

impl Collector for RecordingCollector {
    fn send<'a>(&'a self, app_key: &'a AppKey, report: &'a TraceReport) -> SendFuture<'a> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reports.lock().push(RecordedReport {
                app_key: app_key.as_str().to_string(),
                report: report.clone(),
            });
            Ok(())
        })
    }
}

impl std::fmt::Debug for RecordingCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingCollector")
            .field("count", &self.count())
            .field("delay", &self.delay)
            .finish()
    }
}

/// A collector whose every delivery fails.
#[derive(Debug)]
pub struct FailingCollector {
    kind: ErrorKind,
    attempts: AtomicU64,
}

impl FailingCollector {
    /// Creates a collector that fails with `kind`.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns the number of deliveries attempted.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}

impl Collector for FailingCollector {
    fn send<'a>(&'a self, _app_key: &'a AppKey, _report: &'a TraceReport) -> SendFuture<'a> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        let kind = self.kind;
        Box::pin(async move { Err(Error::from_kind(kind)) })
    }
}
