//! Synchronous handler demo.
//!
//! # Running
//!
//! ```bash
//! RUST_LOG=zigmond=debug cargo run --bin blocking_handler -- app_...
//! ```
//!
//! Without an argument the app key is read from `ZIGMOND_APP_KEY`.

use std::env;

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use zigmond::{AppKey, blocking};

fn handle(event: Value, _ctx: ()) -> Result<Value, std::convert::Infallible> {
    let intent = event["request"]["intent"]["name"].as_str().unwrap_or("none");
    Ok(json!({"version": "1.0", "intent": intent}))
}

fn main() -> zigmond::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let tracer = zigmond::trace_req_resp(env::args().nth(1).map(AppKey::from))?;
    let traced = blocking::Tracer::new(tracer)?.wrap(handle);

    let event = json!({"request": {"type": "IntentRequest", "intent": {"name": "HelloIntent"}}});
    let invocation = traced.invoke(event, ());

    println!("result: {:?}", invocation.result);
    println!("report: {:?}", invocation.report);
    Ok(())
}
