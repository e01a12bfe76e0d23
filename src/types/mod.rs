//! Data carried from an invocation to the collector.
//!
//! - [`CapturedEvent`]: detached snapshot of the invocation event
//! - [`TraceReport`]: the JSON body posted to the collector
//! - [`is_present`]: the emptiness rule shared by requests and responses

mod capture;
mod report;

pub use capture::{CapturedEvent, REQUEST_KEY, is_present};
pub use report::{TraceReport, format_response_ts};
