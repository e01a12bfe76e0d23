//! Configuration for the tracing decorator.
//!
//! - [`TracerConfig`]: collector endpoint and delivery timeout
//! - Constants shared with the collector's wire contract

mod tracer;

use std::time::Duration;

pub use tracer::TracerConfig;

/// Environment variable holding the app key when none is supplied explicitly.
pub const APP_KEY_ENV_VAR: &str = "ZIGMOND_APP_KEY";

/// Header carrying the app key on every report.
pub const APP_KEY_HEADER: &str = "X-Zigmond-App-Key";

/// Production collector endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.zigmond.ai/v1/trace";

/// Default bound on a single report delivery.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
