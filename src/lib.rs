//! # Zigmond for Rust
//!
//! Request/response tracing for serverless skill and webhook handlers.
//!
//! Wrap your entry point with a [`Tracer`] and every invocation whose event
//! carries a non-empty `request` is reported, together with the handler's
//! response, to the Zigmond collector for analysis in the dashboard.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use serde_json::{json, Value};
//! use zigmond::prelude::*;
//!
//! async fn handler(event: Value, _ctx: ()) -> Result<Value, std::io::Error> {
//!     Ok(json!({"version": "1.0", "response": {"shouldEndSession": true}}))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zigmond::Error> {
//!     // App key from ZIGMOND_APP_KEY; fails here, never at call time
//!     let traced = Tracer::from_env()?.wrap(handler);
//!
//!     let response = traced.call(json!({"request": {"type": "LaunchRequest"}}), ()).await;
//!     println!("{:?}", response);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Transparent**: a wrapped handler returns exactly what the handler returns
//! - **Copy-on-capture**: the event is snapshotted before the handler runs
//! - **Best effort**: timeouts and connection failures are dropped, never retried
//! - **Wrap-time errors only**: a missing app key fails when wrapping
//!
//! ## Features
//!
//! - `rest` (default): Deliver reports over HTTP via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)
//! - `blocking`: Trace synchronous handlers

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod config;
pub mod error;
pub mod tracer;
pub mod types;

// Transport layer
pub mod transport;

// Synchronous handlers
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

#[cfg(feature = "rest")]
mod user_agent;

// Re-export main types at crate root for convenience
pub use auth::AppKey;
pub use config::TracerConfig;
pub use error::{Error, ErrorKind, Result};
pub use tracer::{
    Decorated, Invocation, ReportOutcome, SkipReason, TraceArg, Traced, Tracer, TracerBuilder,
    decorate, trace, trace_req_resp,
};
pub use types::TraceReport;
