//! Tracing for synchronous handlers.
//!
//! Same contract as [`Traced`](crate::Traced), for handlers that are plain
//! functions. The report is sent by blocking on a private single-threaded
//! runtime after the handler returns.
//!
//! Do not call [`Traced::call`] from inside an async runtime; use the async
//! [`Traced`](crate::Traced) there instead. Inside a runtime the handler
//! still runs and its result is returned, but no report is sent and
//! [`Traced::invoke`] returns [`ReportOutcome::Failed`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use serde_json::{json, Value};
//! use zigmond::blocking;
//!
//! fn handler(event: Value, _ctx: ()) -> Result<Value, std::io::Error> {
//!     Ok(json!({"version": "1.0"}))
//! }
//!
//! let traced = blocking::Tracer::from_env()?.wrap(handler);
//! let response = traced.call(json!({"request": {"type": "LaunchRequest"}}), ())?;
//! ```

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::runtime::Runtime;

use crate::tracer::{Invocation, ReportOutcome, SkipReason};
use crate::types::CapturedEvent;
use crate::{Error, Result};

/// A [`crate::Tracer`] paired with a runtime to drive report delivery.
#[derive(Clone)]
pub struct Tracer {
    tracer: crate::Tracer,
    runtime: Arc<Runtime>,
}

impl Tracer {
    /// Wraps an async tracer for use with synchronous handlers.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the runtime cannot be started.
    pub fn new(tracer: crate::Tracer) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                Error::configuration(format!("Failed to start report runtime: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            tracer,
            runtime: Arc::new(runtime),
        })
    }

    /// Creates a tracer whose app key is read from `ZIGMOND_APP_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the variable is unset.
    pub fn from_env() -> Result<Self> {
        Self::new(crate::Tracer::from_env()?)
    }

    /// Returns the underlying async tracer.
    pub fn inner(&self) -> &crate::Tracer {
        &self.tracer
    }

    /// Wraps `handler`.
    pub fn wrap<F>(&self, handler: F) -> Traced<F> {
        Traced {
            tracer: self.clone(),
            handler,
        }
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::Tracer")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

/// A synchronous handler that reports its invocations to the collector.
pub struct Traced<F> {
    tracer: Tracer,
    handler: F,
}

impl<F> Traced<F> {
    /// Unwraps the handler.
    pub fn into_inner(self) -> F {
        self.handler
    }

    /// Invokes the handler and returns its result unchanged.
    pub fn call<E, C, R, Err>(&self, event: E, context: C) -> std::result::Result<R, Err>
    where
        F: Fn(E, C) -> std::result::Result<R, Err>,
        E: Serialize,
        R: Serialize,
    {
        self.invoke(event, context).into_result()
    }

    /// Invokes the handler and also reports what happened to the trace.
    pub fn invoke<E, C, R, Err>(&self, event: E, context: C) -> Invocation<R, Err>
    where
        F: Fn(E, C) -> std::result::Result<R, Err>,
        E: Serialize,
        R: Serialize,
    {
        let span = tracing::debug_span!("zigmond.invocation");
        let _entered = span.enter();

        let captured = crate::Tracer::capture(&event);
        let handled =
            std::panic::catch_unwind(AssertUnwindSafe(|| (self.handler)(event, context)));
        let captured_at = Utc::now();

        match handled {
            Ok(result) => {
                let report = self.finish(captured, result.as_ref().ok(), captured_at);
                Invocation { result, report }
            }
            Err(panic) => {
                let _ = self.finish::<R>(captured, None, captured_at);
                std::panic::resume_unwind(panic)
            }
        }
    }

    /// Delivers the report on the private runtime.
    ///
    /// Nothing is sent when called from inside an async runtime, where
    /// blocking would panic.
    fn finish<R: Serialize>(
        &self,
        captured: std::result::Result<CapturedEvent, SkipReason>,
        response: Option<&R>,
        captured_at: DateTime<Utc>,
    ) -> ReportOutcome {
        if tokio::runtime::Handle::try_current().is_ok() {
            let err = Error::configuration(
                "blocking::Traced called from inside an async runtime, use zigmond::Traced there",
            );
            tracing::warn!(error = %err, "trace report not sent");
            return ReportOutcome::Failed(err);
        }

        self.tracer
            .runtime
            .block_on(self.tracer.tracer.finish(captured, response, captured_at))
    }
}

impl<F> std::fmt::Debug for Traced<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::Traced")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}
