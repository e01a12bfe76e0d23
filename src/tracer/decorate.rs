//! The two decorator usages: with an app key, or applied straight to a handler.

use super::{Traced, Tracer};
use crate::{AppKey, Result};

/// The single optional argument a decorator is applied with.
///
/// ```rust
/// use zigmond::{AppKey, TraceArg};
///
/// type Handler = fn(serde_json::Value, ()) -> std::future::Ready<Result<(), ()>>;
///
/// let explicit: TraceArg<Handler> = AppKey::new("app_3f9c2a").into();
/// assert!(matches!(explicit, TraceArg::AppKey(_)));
///
/// let from_env: TraceArg<Handler> = TraceArg::Env;
/// assert!(matches!(from_env, TraceArg::Env));
/// ```
pub enum TraceArg<F> {
    /// An explicit app key: produces a tracer to wrap handlers with.
    AppKey(AppKey),

    /// No argument: key from `ZIGMOND_APP_KEY`, produces a tracer.
    Env,

    /// A handler: key from `ZIGMOND_APP_KEY`, produces the wrapped handler.
    Handler(F),
}

impl<F> From<AppKey> for TraceArg<F> {
    fn from(app_key: AppKey) -> Self {
        TraceArg::AppKey(app_key)
    }
}

impl<F> std::fmt::Debug for TraceArg<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceArg::AppKey(app_key) => f.debug_tuple("AppKey").field(app_key).finish(),
            TraceArg::Env => write!(f, "Env"),
            TraceArg::Handler(_) => f.debug_tuple("Handler").finish_non_exhaustive(),
        }
    }
}

/// Result of [`decorate`]: either a wrapper factory or a ready wrapper.
pub enum Decorated<F> {
    /// A tracer still waiting for a handler.
    Tracer(Tracer),

    /// A handler already wrapped.
    Traced(Traced<F>),
}

impl<F> Decorated<F> {
    /// Returns the tracer behind either variant.
    pub fn tracer(&self) -> &Tracer {
        match self {
            Decorated::Tracer(tracer) => tracer,
            Decorated::Traced(traced) => traced.tracer(),
        }
    }

    /// Returns the wrapper factory, if this is one.
    pub fn into_tracer(self) -> Option<Tracer> {
        match self {
            Decorated::Tracer(tracer) => Some(tracer),
            Decorated::Traced(_) => None,
        }
    }

    /// Returns the wrapped handler, if this is one.
    pub fn into_traced(self) -> Option<Traced<F>> {
        match self {
            Decorated::Traced(traced) => Some(traced),
            Decorated::Tracer(_) => None,
        }
    }
}

impl<F> std::fmt::Debug for Decorated<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decorated::Tracer(tracer) => f.debug_tuple("Tracer").field(tracer).finish(),
            Decorated::Traced(traced) => f.debug_tuple("Traced").field(traced).finish(),
        }
    }
}

/// Applies the decorator with its single optional argument.
///
/// Branches on the argument instead of requiring a different entry point:
///
/// ```rust,ignore
/// use zigmond::{decorate, AppKey, TraceArg};
///
/// // decorator(app_key)(handler)
/// let traced = decorate(TraceArg::AppKey(AppKey::new("app_3f9c2a")))?
///     .into_tracer()
///     .unwrap()
///     .wrap(handler);
///
/// // decorator applied bare to handler
/// let traced = decorate(TraceArg::Handler(handler))?.into_traced().unwrap();
/// ```
///
/// # Errors
///
/// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if no
/// app key is given and `ZIGMOND_APP_KEY` is unset.
pub fn decorate<F>(arg: TraceArg<F>) -> Result<Decorated<F>> {
    Tracer::builder().decorate(arg)
}

/// Creates a tracer from an optional explicit app key.
///
/// `None` reads `ZIGMOND_APP_KEY`.
///
/// ```rust,ignore
/// let traced = zigmond::trace_req_resp(Some("app_3f9c2a".into()))?.wrap(handler);
/// ```
///
/// # Errors
///
/// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
/// `app_key` is `None` and `ZIGMOND_APP_KEY` is unset.
pub fn trace_req_resp(app_key: Option<AppKey>) -> Result<Tracer> {
    let builder = Tracer::builder();
    match app_key {
        Some(app_key) => builder.app_key(app_key).build(),
        None => builder.build(),
    }
}

/// Wraps `handler` with the app key from `ZIGMOND_APP_KEY`.
///
/// ```rust,ignore
/// let traced = zigmond::trace(handler)?;
/// ```
///
/// # Errors
///
/// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
/// `ZIGMOND_APP_KEY` is unset.
pub fn trace<F>(handler: F) -> Result<Traced<F>> {
    Ok(Tracer::from_env()?.wrap(handler))
}
