//! Error types for the tracing decorator.
//!
//! A single [`Error`] type categorized by [`ErrorKind`].
//!
//! ## Key Invariant
//!
//! Only configuration errors (a missing app key) are ever returned to the code
//! that wraps a handler, and only at wrap time. Failures while reporting a
//! trace never change what the wrapped handler returns.
//!
//! ```rust,ignore
//! // Wrap time: the only place an error surfaces
//! let tracer = Tracer::from_env()?;
//!
//! // Call time: the handler's own result, untouched
//! let response = tracer.wrap(handler).call(event, context).await;
//! ```

mod core;
mod kind;

pub use self::core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for tracing operations.
pub type Result<T> = std::result::Result<T, Error>;
