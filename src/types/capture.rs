//! Snapshotting invocation events and judging emptiness.

use serde::Serialize;
use serde_json::Value;

use crate::Error;

/// Key in the invocation event that holds the request payload.
pub const REQUEST_KEY: &str = "request";

/// Returns `true` if `value` carries content.
///
/// `null`, `false`, numeric zero, `""`, `[]` and `{}` are empty. Everything
/// else is not. The same rule decides whether an event is traced and whether
/// a handler's result is included in the report.
///
/// ```rust
/// use serde_json::json;
/// use zigmond::types::is_present;
///
/// assert!(is_present(&json!({"type": "LaunchRequest"})));
/// assert!(!is_present(&json!({})));
/// assert!(!is_present(&json!(null)));
/// ```
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// A value-independent copy of an invocation event.
///
/// Taken before the handler runs, so whatever the handler does to its own
/// event afterwards does not leak into the report.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedEvent {
    event: Value,
}

impl CapturedEvent {
    /// Serializes `event` into a detached JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`Serialization`](crate::ErrorKind::Serialization) error if
    /// the event cannot be represented as JSON (for example a map with
    /// non-string keys).
    pub fn capture<E: Serialize + ?Sized>(event: &E) -> Result<Self, Error> {
        Ok(Self {
            event: serde_json::to_value(event)?,
        })
    }

    /// Returns `true` if the event has a non-empty `request` key.
    ///
    /// Events that are not JSON objects never qualify.
    pub fn has_request(&self) -> bool {
        self.event
            .as_object()
            .and_then(|map| map.get(REQUEST_KEY))
            .is_some_and(is_present)
    }

    /// Returns the snapshot.
    pub fn as_value(&self) -> &Value {
        &self.event
    }

    /// Consumes the capture, returning the snapshot.
    pub fn into_value(self) -> Value {
        self.event
    }
}

impl From<Value> for CapturedEvent {
    fn from(event: Value) -> Self {
        Self { event }
    }
}
