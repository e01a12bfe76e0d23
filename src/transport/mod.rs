//! Delivery of trace reports.
//!
//! - [`Collector`]: object-safe destination for reports
//! - [`HttpCollector`]: `POST`s reports to the remote collector (feature `rest`)
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable [`HttpCollector`] via reqwest
//!
//! Without `rest`, a [`Tracer`](crate::Tracer) must be given a custom
//! collector through its builder.

pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub use traits::{Collector, SendFuture};

#[cfg(feature = "rest")]
pub use rest::HttpCollector;
