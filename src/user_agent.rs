//! User-Agent header sent with trace reports.
//!
//! Lets the collector tell which client version and platform produced a
//! report.

use std::sync::OnceLock;

/// Client name used in the User-Agent string.
const SDK_NAME: &str = "zigmond-rust";

/// Crate version from Cargo.toml.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cached User-Agent string (computed once on first access).
static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string for report requests.
///
/// Format: `zigmond-rust/0.1.0 (rust/1.85; darwin/aarch64)`
///
/// Components:
/// - Client name and version
/// - Rust version (compile-time)
/// - OS and architecture
///
/// The string is computed once and cached for subsequent calls.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} ({}; {}/{})",
            SDK_NAME,
            SDK_VERSION,
            rust_version(),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

/// Returns the Rust version string.
fn rust_version() -> &'static str {
    concat!("rust/", env!("CARGO_PKG_RUST_VERSION"))
}

/// Returns a normalized OS name.
fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
