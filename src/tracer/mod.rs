//! The tracing decorator.
//!
//! - [`Tracer`]: a resolved app key plus a collector, created once per wrap
//! - [`Traced`]: a handler wrapped by a tracer
//! - [`decorate`], [`trace`], [`trace_req_resp`]: the two decorator usages
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zigmond::Tracer;
//!
//! async fn handler(event: serde_json::Value, _ctx: ()) -> Result<serde_json::Value, MyError> {
//!     Ok(serde_json::json!({"version": "1.0"}))
//! }
//!
//! let traced = Tracer::from_env()?.wrap(handler);
//! let response = traced.call(event, ()).await;
//! ```
//!
//! ## What Gets Reported
//!
//! ```text
//! call(event, context)
//!   │
//!   ├─ snapshot event ──── fails, or no non-empty `request` ──► no report
//!   │
//!   ├─ handler(event, context) ──► result (returned untouched)
//!   │
//!   └─ POST { request: snapshot, response?, response_ts? }
//!        timeout / connection failure ──► dropped
//! ```

mod builder;
mod decorate;
mod invocation;
mod traced;

pub use builder::TracerBuilder;
pub use decorate::{Decorated, TraceArg, decorate, trace, trace_req_resp};
pub use invocation::{Invocation, ReportOutcome, SkipReason};
pub use traced::Traced;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::transport::Collector;
use crate::types::{CapturedEvent, TraceReport};
use crate::{AppKey, Error, Result};

/// A resolved app key bound to a collector.
///
/// Create one per wrapped handler (or share one across handlers; it is
/// `Clone` and `Send + Sync`). The tracer holds no per-invocation state.
///
/// ## Example
///
/// ```rust,ignore
/// use zigmond::{AppKey, Tracer};
///
/// // Explicit key: the environment is never consulted
/// let tracer = Tracer::new(AppKey::new("app_3f9c2a"))?;
///
/// // Key from ZIGMOND_APP_KEY
/// let tracer = Tracer::from_env()?;
///
/// let traced = tracer.wrap(my_handler);
/// ```
#[derive(Clone)]
pub struct Tracer {
    inner: Arc<TracerInner>,
}

struct TracerInner {
    app_key: AppKey,
    collector: Arc<dyn Collector>,
    timeout: Duration,
}

impl Tracer {
    /// Creates a new tracer builder.
    pub fn builder() -> TracerBuilder {
        TracerBuilder::new()
    }

    /// Creates a tracer with an explicit app key and the default collector.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the default collector cannot be created.
    pub fn new(app_key: impl Into<AppKey>) -> Result<Self> {
        Self::builder().app_key(app_key).build()
    }

    /// Creates a tracer whose app key is read from `ZIGMOND_APP_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error
    /// naming the variable if it is unset.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    pub(crate) fn from_parts(
        app_key: AppKey,
        collector: Arc<dyn Collector>,
        timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(TracerInner {
                app_key,
                collector,
                timeout,
            }),
        }
    }

    /// Returns the resolved app key.
    pub fn app_key(&self) -> &AppKey {
        &self.inner.app_key
    }

    /// Returns the delivery timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Wraps `handler`.
    ///
    /// The returned [`Traced`] behaves exactly like `handler` and reports
    /// each traced invocation to the collector.
    pub fn wrap<F>(&self, handler: F) -> Traced<F> {
        Traced::new(self.clone(), handler)
    }

    /// Snapshots `event` and decides whether the invocation is traced.
    pub(crate) fn capture<E: Serialize>(
        event: &E,
    ) -> std::result::Result<CapturedEvent, SkipReason> {
        match CapturedEvent::capture(event) {
            Ok(captured) if captured.has_request() => Ok(captured),
            Ok(_) => Err(SkipReason::NoRequest),
            Err(err) => {
                tracing::debug!(error = %err, "could not capture invocation event, skipping trace");
                Err(SkipReason::CaptureFailed)
            }
        }
    }

    /// Builds and delivers the report for one finished invocation.
    ///
    /// `response` is `None` when the handler failed or panicked.
    pub(crate) async fn finish<R: Serialize>(
        &self,
        captured: std::result::Result<CapturedEvent, SkipReason>,
        response: Option<&R>,
        captured_at: DateTime<Utc>,
    ) -> ReportOutcome {
        let event = match captured {
            Ok(event) => event,
            Err(reason) => return ReportOutcome::Skipped(reason),
        };

        let mut report = TraceReport::new(event);
        if let Some(response) = response {
            match serde_json::to_value(response) {
                Ok(value) => report = report.with_response(value, captured_at),
                Err(err) => {
                    let err = Error::from(err);
                    tracing::warn!(error = %err, "could not serialize handler response, trace not sent");
                    return ReportOutcome::Failed(err);
                }
            }
        }

        self.deliver(&report).await
    }

    /// Sends `report`, dropping timeouts and connection failures.
    async fn deliver(&self, report: &TraceReport) -> ReportOutcome {
        let send = self.inner.collector.send(&self.inner.app_key, report);

        let result = match tokio::time::timeout(self.inner.timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(format!(
                "collector did not answer within {:?}",
                self.inner.timeout
            ))),
        };

        match result {
            Ok(()) => {
                tracing::debug!(has_response = report.has_response(), "trace report sent");
                ReportOutcome::Sent
            }
            Err(err) if err.is_transport_failure() => {
                tracing::debug!(error = %err, "trace report dropped");
                ReportOutcome::Dropped(err)
            }
            Err(err) => {
                tracing::warn!(error = %err, "trace report failed");
                ReportOutcome::Failed(err)
            }
        }
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("app_key", &self.inner.app_key)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}
