//! Integration tests for the Zigmond tracing decorator.
//!
//! Every test runs against a local `wiremock` server standing in for the
//! collector, so no network access or app key is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With decorator logs
//! RUST_LOG=zigmond=debug cargo test --test integration -- --nocapture
//! ```

#![allow(clippy::panic, clippy::expect_used)]

mod common;
mod decorator_tests;
mod delivery_tests;
