//! Prelude module for convenient imports.
//!
//! ```rust
//! use zigmond::prelude::*;
//! ```
//!
//! This provides access to:
//! - The decorator types and entry points
//! - Error types
//! - The app key and collector configuration

pub use crate::{
    auth::AppKey,
    config::TracerConfig,
    error::{Error, ErrorKind},
    tracer::{
        Decorated, Invocation, ReportOutcome, SkipReason, TraceArg, Traced, Tracer,
        TracerBuilder, decorate, trace, trace_req_resp,
    },
    transport::Collector,
};
