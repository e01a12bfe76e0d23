//! Common test harness: a mock collector and tracers pointed at it.

use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zigmond::{Tracer, TracerBuilder};

/// Path the mock collector listens on.
pub const TRACE_PATH: &str = "/v1/trace";

/// App key used by every test tracer.
pub const TEST_APP_KEY: &str = "app_integration";

static INIT_LOGGING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A mock collector that accepts every report.
pub async fn accepting_collector() -> MockServer {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRACE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// A builder whose collector endpoint is `server` and whose environment is
/// empty.
pub fn builder_for(server: &MockServer) -> TracerBuilder {
    Tracer::builder()
        .endpoint(format!("{}{}", server.uri(), TRACE_PATH))
        .timeout(Duration::from_secs(3))
        .env_lookup(|_| None)
}

/// A tracer with the test app key posting to `server`.
pub fn tracer_for(server: &MockServer) -> Tracer {
    builder_for(server)
        .app_key(TEST_APP_KEY)
        .build()
        .expect("tracer should build against the mock collector")
}

/// Bodies of every report the mock collector received.
pub async fn received_reports(server: &MockServer) -> Result<Vec<Value>> {
    let requests = server
        .received_requests()
        .await
        .context("request recording is enabled by default")?;

    requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).context("report body should be JSON"))
        .collect()
}

/// An Alexa-style launch event.
pub fn launch_event() -> Value {
    json!({
        "version": "1.0",
        "session": {"new": true, "sessionId": "amzn1.echo-api.session.1"},
        "request": {
            "type": "LaunchRequest",
            "requestId": "amzn1.echo-api.request.1",
            "locale": "en-US"
        }
    })
}

/// Checks `ts` against `YYYY-MM-DDTHH:MM:SSZ`.
pub fn is_response_ts(ts: &str) -> bool {
    chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%SZ").is_ok() && ts.len() == 20
}
