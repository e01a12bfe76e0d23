//! A handler wrapped by a tracer.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use chrono::Utc;
use futures::FutureExt;
use serde::Serialize;
use tracing::Instrument;

use super::{Invocation, Tracer};

/// A handler that reports its invocations to the collector.
///
/// `Traced` is transparent: [`call`](Self::call) returns exactly what the
/// handler returns, `Ok` or `Err`, and re-raises the handler's panics. Any
/// extra arguments a handler needs beyond `(event, context)` are captured by
/// the closure being wrapped.
///
/// The report is sent after the handler finishes and before `call` returns,
/// on every exit path: success, error and panic.
///
/// ## Example
///
/// ```rust,ignore
/// use serde_json::{json, Value};
/// use zigmond::Tracer;
///
/// let traced = Tracer::from_env()?.wrap(|event: Value, _ctx: ()| async move {
///     Ok::<_, std::io::Error>(json!({"version": "1.0", "echo": event["request"]}))
/// });
///
/// let response = traced.call(json!({"request": {"type": "LaunchRequest"}}), ()).await?;
/// ```
pub struct Traced<F> {
    tracer: Tracer,
    handler: F,
}

impl<F> Traced<F> {
    pub(crate) fn new(tracer: Tracer, handler: F) -> Self {
        Self { tracer, handler }
    }

    /// Returns the tracer reporting for this handler.
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the wrapped handler.
    pub fn handler(&self) -> &F {
        &self.handler
    }

    /// Unwraps the handler.
    pub fn into_inner(self) -> F {
        self.handler
    }

    /// Invokes the handler and returns its result unchanged.
    pub async fn call<E, C, Fut, R, Err>(&self, event: E, context: C) -> Result<R, Err>
    where
        F: Fn(E, C) -> Fut,
        Fut: Future<Output = Result<R, Err>>,
        E: Serialize,
        R: Serialize,
    {
        self.invoke(event, context).await.into_result()
    }

    /// Invokes the handler and also reports what happened to the trace.
    ///
    /// The handler's result is the same as from [`call`](Self::call); the
    /// extra [`ReportOutcome`](super::ReportOutcome) exposes report failures
    /// that `call` only logs.
    pub async fn invoke<E, C, Fut, R, Err>(&self, event: E, context: C) -> Invocation<R, Err>
    where
        F: Fn(E, C) -> Fut,
        Fut: Future<Output = Result<R, Err>>,
        E: Serialize,
        R: Serialize,
    {
        let span = tracing::debug_span!("zigmond.invocation");

        async move {
            let captured = Tracer::capture(&event);

            let handled = AssertUnwindSafe(async move { (self.handler)(event, context).await })
                .catch_unwind()
                .await;
            let captured_at = Utc::now();

            match handled {
                Ok(result) => {
                    let report = self
                        .tracer
                        .finish(captured, result.as_ref().ok(), captured_at)
                        .await;
                    Invocation { result, report }
                }
                Err(panic) => {
                    let _ = self.tracer.finish::<R>(captured, None, captured_at).await;
                    std::panic::resume_unwind(panic)
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl<F> Clone for Traced<F>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            tracer: self.tracer.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<F> std::fmt::Debug for Traced<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traced")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}
