//! The collector abstraction.

use std::future::Future;
use std::pin::Pin;

use crate::Error;
use crate::types::TraceReport;

/// Future returned by [`Collector::send`].
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;

/// Destination for trace reports.
///
/// The production implementation is [`HttpCollector`](crate::transport::HttpCollector).
/// Tests and custom sinks implement this trait directly and hand it to
/// [`Tracer::builder`](crate::Tracer::builder).
///
/// ## Error Contract
///
/// Return [`ErrorKind::Timeout`](crate::ErrorKind::Timeout) or
/// [`ErrorKind::Connection`](crate::ErrorKind::Connection) for delivery
/// failures the decorator should drop silently. Any other kind is logged and
/// surfaced as [`ReportOutcome::Failed`](crate::ReportOutcome::Failed).
///
/// ## Object Safety
///
/// This trait is object-safe, so you can use `Arc<dyn Collector>`.
///
/// ## Example
///
/// ```rust
/// use zigmond::transport::{Collector, SendFuture};
/// use zigmond::types::TraceReport;
/// use zigmond::AppKey;
///
/// struct StdoutCollector;
///
/// impl Collector for StdoutCollector {
///     fn send<'a>(&'a self, _app_key: &'a AppKey, report: &'a TraceReport) -> SendFuture<'a> {
///         Box::pin(async move {
///             println!("{}", serde_json::to_string(report)?);
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Collector: Send + Sync {
    /// Delivers one report on behalf of `app_key`.
    fn send<'a>(&'a self, app_key: &'a crate::AppKey, report: &'a TraceReport) -> SendFuture<'a>;
}
