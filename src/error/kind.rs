//! Error kind enumeration for categorizing tracing errors.

/// Categorization of errors raised while setting up or reporting a trace.
///
/// Only [`Configuration`](ErrorKind::Configuration) ever reaches the code that
/// wraps a handler. Every other kind describes a failure of the report path
/// and is absorbed by the decorator.
///
/// ## Swallowed vs Surfaced
///
/// | ErrorKind       | Raised at  | Decorator behavior                   |
/// |-----------------|------------|--------------------------------------|
/// | `Configuration` | wrap time  | Returned to the caller               |
/// | `Timeout`       | call time  | Silently dropped                     |
/// | `Connection`    | call time  | Silently dropped                     |
/// | `Serialization` | call time  | Logged, `ReportOutcome::Failed`      |
/// | `Unauthorized`  | call time  | Logged, `ReportOutcome::Failed`      |
/// | `RateLimited`   | call time  | Logged, `ReportOutcome::Failed`      |
/// | `Unavailable`   | call time  | Logged, `ReportOutcome::Failed`      |
/// | `Transport`     | call time  | Logged, `ReportOutcome::Failed`      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Configuration error (missing app key, invalid endpoint URL).
    ///
    /// The only kind raised to the wrapping code. Fix before deploying.
    #[error("configuration error")]
    Configuration,

    /// A value could not be converted to JSON.
    ///
    /// Covers both the invocation event and the handler's response.
    #[error("serialization error")]
    Serialization,

    /// The collector did not answer within the configured timeout.
    #[error("timeout")]
    Timeout,

    /// Connection error (DNS, TLS handshake, connection refused).
    #[error("connection error")]
    Connection,

    /// The collector rejected the app key.
    ///
    /// HTTP: 401 Unauthorized / 403 Forbidden
    #[error("unauthorized")]
    Unauthorized,

    /// The collector is throttling this app key.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// The collector is temporarily unavailable.
    ///
    /// HTTP: 5xx
    #[error("service unavailable")]
    Unavailable,

    /// Transport layer error that doesn't fit a more specific category.
    #[error("transport error")]
    Transport,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` for the failure kinds the decorator drops without a trace.
    ///
    /// Only timeouts and connection failures qualify. Everything else is
    /// logged and surfaced through [`ReportOutcome::Failed`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use zigmond::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_transport_failure());
    /// assert!(ErrorKind::Connection.is_transport_failure());
    /// assert!(!ErrorKind::Unavailable.is_transport_failure());
    /// ```
    ///
    /// [`ReportOutcome::Failed`]: crate::ReportOutcome::Failed
    #[inline]
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::Connection)
    }

    /// Creates an `ErrorKind` from a collector HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Unauthorized,
            408 => ErrorKind::Timeout,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Unavailable,
            400..=499 => ErrorKind::Transport,
            _ => ErrorKind::Unknown,
        }
    }
}
