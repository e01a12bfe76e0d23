//! HTTP collector implementation using reqwest.

use std::error::Error as StdError;
use std::io;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::traits::{Collector, SendFuture};
use crate::config::{APP_KEY_HEADER, TracerConfig};
use crate::error::ErrorKind;
use crate::types::TraceReport;
use crate::{AppKey, Error, user_agent};

/// hyper's message for a connection closed before the response arrived.
const INCOMPLETE_MESSAGE: &str = "connection closed before message completed";

/// Posts trace reports to the remote collector over HTTP.
///
/// One `POST` per report, no retries. The configured timeout bounds the whole
/// exchange, connection setup included.
#[derive(Clone)]
pub struct HttpCollector {
    client: reqwest::Client,
    endpoint: Url,
}

impl std::fmt::Debug for HttpCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCollector")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpCollector {
    /// Creates a collector for the endpoint and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](ErrorKind::Configuration) error if the
    /// endpoint does not parse or the HTTP client cannot be created.
    pub fn new(config: &TracerConfig) -> Result<Self, Error> {
        let endpoint = config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| {
                Error::new(
                    ErrorKind::Configuration,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client, endpoint })
    }

    /// Returns the collector URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds the headers for one report.
    fn build_headers(app_key: &AppKey) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let name = HeaderName::from_bytes(APP_KEY_HEADER.as_bytes()).map_err(|_| {
            Error::new(ErrorKind::Configuration, "Invalid app key header name")
        })?;
        let value = HeaderValue::from_str(app_key.as_str()).map_err(|_| {
            Error::new(ErrorKind::Configuration, "Invalid app key header value")
        })?;
        headers.insert(name, value);
        Ok(headers)
    }

    async fn post(&self, app_key: &AppKey, report: &TraceReport) -> Result<(), Error> {
        let headers = Self::build_headers(app_key)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .json(report)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), &error_text));
        }

        Ok(())
    }
}

impl Collector for HttpCollector {
    fn send<'a>(&'a self, app_key: &'a AppKey, report: &'a TraceReport) -> SendFuture<'a> {
        Box::pin(self.post(app_key, report))
    }
}

/// Maps reqwest errors to crate errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::new(ErrorKind::Timeout, format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::new(ErrorKind::Connection, format!("Connection failed: {}", e))
    } else if e.is_request() && is_peer_closed(&e) {
        Error::new(
            ErrorKind::Connection,
            format!("Connection closed by collector: {}", e),
        )
    } else if e.is_builder() || e.is_body() {
        Error::new(
            ErrorKind::Serialization,
            format!("Invalid report body: {}", e),
        )
    } else {
        Error::new(ErrorKind::Transport, format!("HTTP error: {}", e))
    }
}

/// Returns `true` if `err` or any of its sources says the collector hung up
/// after accepting the connection.
fn is_peer_closed(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<io::Error>() {
            if matches!(
                io.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        // hyper reports an EOF before the response head this way
        if err.to_string().contains(INCOMPLETE_MESSAGE) {
            return true;
        }
        current = err.source();
    }
    false
}

/// Maps collector status codes to crate errors.
fn map_status_error(status: u16, body: &str) -> Error {
    let message = if body.is_empty() {
        format!("HTTP {}", status)
    } else if let Ok(error) = serde_json::from_str::<serde_json::Value>(body) {
        error
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or(body)
            .to_string()
    } else {
        body.to_string()
    };

    Error::new(ErrorKind::from_http_status(status), message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status_error_json_body() {
        let err = map_status_error(401, r#"{"error": "unknown app key"}"#);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.message(), "unknown app key");
    }

    #[test]
    fn test_map_status_error_plain_body() {
        let err = map_status_error(503, "maintenance");
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(err.message(), "maintenance");
    }

    #[test]
    fn test_map_status_error_empty_body() {
        let err = map_status_error(429, "");
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(err.message(), "HTTP 429");
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = TracerConfig::builder().endpoint("not a url").build();
        let err = HttpCollector::new(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_invalid_app_key_header() {
        let err = HttpCollector::build_headers(&AppKey::new("bad\nkey")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test_case::test_case(io::ErrorKind::ConnectionReset, true; "reset")]
    #[test_case::test_case(io::ErrorKind::ConnectionAborted, true; "aborted")]
    #[test_case::test_case(io::ErrorKind::BrokenPipe, true; "broken pipe")]
    #[test_case::test_case(io::ErrorKind::UnexpectedEof, true; "eof")]
    #[test_case::test_case(io::ErrorKind::PermissionDenied, false; "permission denied")]
    fn test_peer_closed_in_source_chain(kind: io::ErrorKind, expected: bool) {
        let err = Wrapped(io::Error::new(kind, "socket"));
        assert_eq!(is_peer_closed(&err), expected);
    }

    #[test]
    fn test_peer_closed_incomplete_message() {
        let err = io::Error::other(INCOMPLETE_MESSAGE);
        assert!(is_peer_closed(&Wrapped(err)));
    }

    #[test]
    fn test_debug_shows_endpoint() {
        let collector = HttpCollector::new(&TracerConfig::default()).unwrap();
        let debug = format!("{:?}", collector);
        assert!(debug.contains("api.zigmond.ai"));
    }
}
