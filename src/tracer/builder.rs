//! Tracer builder.

use std::sync::Arc;
use std::time::Duration;

use super::{Decorated, TraceArg, Tracer};
use crate::config::TracerConfig;
use crate::transport::Collector;
use crate::{AppKey, Result};

/// Looks up an environment variable by name.
type EnvLookup = Box<dyn FnOnce(&str) -> Option<String> + Send>;

/// Builder for creating [`Tracer`] instances.
///
/// Everything is optional. Without an explicit app key, [`build`](Self::build)
/// reads `ZIGMOND_APP_KEY`; without a collector it posts to the configured
/// endpoint over HTTP.
///
/// ## Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use zigmond::Tracer;
///
/// let tracer = Tracer::builder()
///     .app_key("app_3f9c2a")
///     .endpoint("https://collector.internal/v1/trace")
///     .timeout(Duration::from_secs(1))
///     .build()?;
/// ```
pub struct TracerBuilder {
    app_key: Option<AppKey>,
    config: TracerConfig,
    collector: Option<Arc<dyn Collector>>,
    env_lookup: EnvLookup,
}

impl TracerBuilder {
    /// Creates a new tracer builder.
    pub fn new() -> Self {
        Self {
            app_key: None,
            config: TracerConfig::default(),
            collector: None,
            env_lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Sets the app key explicitly. The environment is then never read.
    #[must_use]
    pub fn app_key(mut self, app_key: impl Into<AppKey>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Replaces the whole collector configuration.
    #[must_use]
    pub fn config(mut self, config: TracerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the collector endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Sets the bound on a single report delivery.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sends reports to `collector` instead of the HTTP endpoint.
    #[must_use]
    pub fn collector(mut self, collector: Arc<dyn Collector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Reads `ZIGMOND_APP_KEY` through `lookup` instead of the process
    /// environment.
    ///
    /// Only consulted when no explicit app key was given.
    #[must_use]
    pub fn env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<String> + Send + 'static,
    {
        self.env_lookup = Box::new(lookup);
        self
    }

    /// Resolves the app key and creates the tracer.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// no app key was given and `ZIGMOND_APP_KEY` is unset, or if the HTTP
    /// collector cannot be created.
    pub fn build(self) -> Result<Tracer> {
        let app_key = AppKey::resolve_with(self.app_key, self.env_lookup)?;

        let collector = match self.collector {
            Some(collector) => collector,
            None => default_collector(&self.config)?,
        };

        Ok(Tracer::from_parts(app_key, collector, self.config.timeout))
    }

    /// Applies the single optional decorator argument.
    ///
    /// - [`TraceArg::AppKey`]: sets the key, returns a tracer to wrap with
    /// - [`TraceArg::Env`]: key from the environment, returns a tracer
    /// - [`TraceArg::Handler`]: key from the environment, returns the
    ///   wrapped handler
    pub fn decorate<F>(self, arg: TraceArg<F>) -> Result<Decorated<F>> {
        match arg {
            TraceArg::AppKey(app_key) => Ok(Decorated::Tracer(self.app_key(app_key).build()?)),
            TraceArg::Env => Ok(Decorated::Tracer(self.build()?)),
            TraceArg::Handler(handler) => Ok(Decorated::Traced(self.build()?.wrap(handler))),
        }
    }
}

impl Default for TracerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TracerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracerBuilder")
            .field("app_key", &self.app_key)
            .field("config", &self.config)
            .field("has_collector", &self.collector.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "rest")]
fn default_collector(config: &TracerConfig) -> Result<Arc<dyn Collector>> {
    Ok(Arc::new(crate::transport::HttpCollector::new(config)?))
}

#[cfg(not(feature = "rest"))]
fn default_collector(_config: &TracerConfig) -> Result<Arc<dyn Collector>> {
    Err(crate::Error::configuration(
        "no collector configured: enable the `rest` feature or supply one with `TracerBuilder::collector`",
    ))
}
