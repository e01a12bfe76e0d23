//! The record sent to the collector for one invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CapturedEvent;

/// Timestamp format for `response_ts`: ISO-8601, second precision, UTC.
const RESPONSE_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats `at` the way the collector expects `response_ts`.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use zigmond::types::format_response_ts;
///
/// let at = Utc.with_ymd_and_hms(2019, 7, 4, 16, 5, 9).unwrap();
/// assert_eq!(format_response_ts(at), "2019-07-04T16:05:09Z");
/// ```
pub fn format_response_ts(at: DateTime<Utc>) -> String {
    at.format(RESPONSE_TS_FORMAT).to_string()
}

/// One invocation's request and, when there was one, its response.
///
/// Wire shape:
///
/// ```json
/// {
///   "request": { "...": "the whole invocation event" },
///   "response": { "...": "the handler's result" },
///   "response_ts": "2019-07-04T16:05:09Z"
/// }
/// ```
///
/// `response` and `response_ts` are omitted together when the handler failed
/// or returned an empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    /// The invocation event as captured before the handler ran.
    pub request: Value,

    /// The handler's result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,

    /// When the response was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_ts: Option<String>,
}

impl TraceReport {
    /// Starts a report holding only the captured event.
    pub fn new(event: CapturedEvent) -> Self {
        Self {
            request: event.into_value(),
            response: None,
            response_ts: None,
        }
    }

    /// Attaches the handler's result, stamped with `captured_at`.
    ///
    /// Empty results (see [`is_present`](super::is_present)) are ignored and
    /// the report keeps its request-only shape.
    #[must_use]
    pub fn with_response(mut self, response: Value, captured_at: DateTime<Utc>) -> Self {
        if super::is_present(&response) {
            self.response = Some(response);
            self.response_ts = Some(format_response_ts(captured_at));
        }
        self
    }

    /// Returns `true` if the report carries a response.
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }
}
