//! The app key identifying a skill to the collector.

use std::fmt;
use std::sync::Arc;

use crate::config::APP_KEY_ENV_VAR;
use crate::{Error, Result};

/// An opaque credential sent with every trace report.
///
/// The key is resolved once, when a handler is wrapped, and is immutable
/// afterwards. It is sent in the `X-Zigmond-App-Key` header.
///
/// ## Example
///
/// ```rust
/// use zigmond::AppKey;
///
/// let key = AppKey::new("app_3f9c2a");
/// assert_eq!(key.as_str(), "app_3f9c2a");
///
/// // Debug output never leaks the key
/// assert!(!format!("{:?}", key).contains("app_3f9c2a"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AppKey {
    key: Arc<str>,
}

impl AppKey {
    /// Creates an app key from an explicit value.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Arc::from(key.into()),
        }
    }

    /// Reads the app key from the `ZIGMOND_APP_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the variable is unset or not valid unicode.
    pub fn from_env() -> Result<Self> {
        Self::resolve_with(None, |name| std::env::var(name).ok())
    }

    /// Returns `explicit` if given, otherwise looks up `ZIGMOND_APP_KEY`
    /// through `lookup`.
    ///
    /// `lookup` is never called when an explicit key is supplied. This is the
    /// hook for environments that keep variables somewhere other than the
    /// process environment.
    ///
    /// ```rust
    /// use zigmond::{AppKey, ErrorKind};
    ///
    /// let key = AppKey::resolve_with(None, |_| Some("from_lookup".into())).unwrap();
    /// assert_eq!(key.as_str(), "from_lookup");
    ///
    /// let err = AppKey::resolve_with(None, |_| None).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn resolve_with<F>(explicit: Option<AppKey>, lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if let Some(key) = explicit {
            return Ok(key);
        }

        lookup(APP_KEY_ENV_VAR).map(Self::new).ok_or_else(|| {
            Error::configuration(format!(
                "You should either supply your app_key explicitly, or set the {} environment variable",
                APP_KEY_ENV_VAR
            ))
        })
    }

    /// Returns the key.
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppKey").field("key", &"[REDACTED]").finish()
    }
}

impl From<&str> for AppKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for AppKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}
