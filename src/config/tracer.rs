//! Collector endpoint and timeout settings.

use std::time::Duration;

use url::Url;

use super::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::Result;

/// Where and how trace reports are delivered.
///
/// ## Default Values
///
/// - `endpoint`: `https://api.zigmond.ai/v1/trace`
/// - `timeout`: 3s
///
/// ## Example
///
/// ```rust
/// use zigmond::TracerConfig;
/// use std::time::Duration;
///
/// let config = TracerConfig::builder()
///     .endpoint("http://localhost:8080/trace")
///     .timeout(Duration::from_secs(1))
///     .build();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct TracerConfig {
    /// Collector URL that receives `POST`ed reports.
    #[builder(into, default = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,

    /// Upper bound on a single report delivery, connect included.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TracerConfig {
    /// Parses the endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the endpoint is not an absolute URL.
    pub fn validate(&self) -> Result<Url> {
        Ok(Url::parse(&self.endpoint)?)
    }
}
