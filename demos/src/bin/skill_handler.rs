//! Async skill handler demo.
//!
//! Wraps a small voice-skill handler and invokes it with a launch event and
//! a session-ended event. Only the first one carries a response.
//!
//! # Running
//!
//! ```bash
//! export ZIGMOND_APP_KEY="app_..."
//!
//! # Point at a local collector instead of the hosted one
//! export ZIGMOND_ENDPOINT="http://localhost:8080/v1/trace"
//!
//! RUST_LOG=zigmond=debug cargo run --bin skill_handler
//! ```

use std::env;

use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use zigmond::prelude::*;

#[derive(Debug, Serialize)]
struct SkillResponse {
    version: &'static str,
    response: Value,
}

#[derive(Debug)]
struct UnhandledRequest(String);

impl std::fmt::Display for UnhandledRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unhandled request type {}", self.0)
    }
}

async fn handle(event: Value, request_id: String) -> Result<SkillResponse, UnhandledRequest> {
    tracing::info!(%request_id, "handling event");

    match event["request"]["type"].as_str().unwrap_or_default() {
        "LaunchRequest" => Ok(SkillResponse {
            version: "1.0",
            response: json!({
                "outputSpeech": {"type": "PlainText", "text": "Welcome back"},
                "shouldEndSession": false
            }),
        }),
        other => Err(UnhandledRequest(other.to_string())),
    }
}

#[tokio::main]
async fn main() -> zigmond::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut builder = Tracer::builder();
    if let Ok(endpoint) = env::var("ZIGMOND_ENDPOINT") {
        builder = builder.endpoint(endpoint);
    }

    // Key from ZIGMOND_APP_KEY, same as the bare decorator usage
    let traced = match builder.decorate(TraceArg::Handler(handle))? {
        Decorated::Traced(traced) => traced,
        Decorated::Tracer(tracer) => tracer.wrap(handle),
    };

    let launch = json!({
        "version": "1.0",
        "session": {"new": true, "sessionId": "amzn1.echo-api.session.demo"},
        "request": {"type": "LaunchRequest", "requestId": "amzn1.echo-api.request.1"}
    });
    let invocation = traced.invoke(launch, "req-1".to_string()).await;
    match &invocation.result {
        Ok(response) => println!("launch -> {}", response.response),
        Err(err) => println!("launch failed: {}", err),
    }
    println!("launch report: {:?}", invocation.report);

    let ended = json!({"request": {"type": "SessionEndedRequest", "reason": "USER_INITIATED"}});
    let invocation = traced.invoke(ended, "req-2".to_string()).await;
    if let Err(err) = &invocation.result {
        println!("session ended -> {}", err);
    }
    println!("session ended report: {:?}", invocation.report);

    Ok(())
}
