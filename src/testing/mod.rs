//! Testing utilities for code that wraps handlers.
//!
//! - [`RecordingCollector`]: keeps every report in memory
//! - [`FailingCollector`]: fails every delivery with a chosen error kind
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use zigmond::Tracer;
//! use zigmond::testing::RecordingCollector;
//!
//! let collector = Arc::new(RecordingCollector::new());
//! let tracer = Tracer::builder()
//!     .app_key("test_key")
//!     .collector(collector.clone())
//!     .build()
//!     .unwrap();
//!
//! // ... call handlers wrapped by `tracer` ...
//! assert_eq!(collector.count(), 0);
//! ```

mod collectors;

pub use collectors::{FailingCollector, RecordedReport, RecordingCollector};
