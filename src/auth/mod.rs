//! Credentials for the trace collector.
//!
//! The collector identifies callers by an [`AppKey`]. Supply it explicitly
//! or let it be read from `ZIGMOND_APP_KEY` when the handler is wrapped:
//!
//! ```rust,ignore
//! use zigmond::{AppKey, Tracer};
//!
//! // Explicit
//! let tracer = Tracer::new(AppKey::new("app_3f9c2a"))?;
//!
//! // From the environment
//! let tracer = Tracer::from_env()?;
//! ```

mod app_key;

pub use app_key::AppKey;
