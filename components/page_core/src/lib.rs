//! Shared primitive types for the page runtime.
//!
//! This crate provides the types every other component builds on:
//! - [`EpochMillis`] - millisecond-precision wall-clock timestamps
//! - [`PlatformError`] - the error taxonomy for platform primitives
//! - [`DiagnosticSink`] - the reporting seam for non-fatal failures
//!
//! # Examples
//!
//! ```
//! use page_core::EpochMillis;
//!
//! let exit = EpochMillis::from_millis(1_000);
//! let now = EpochMillis::from_millis(62_000);
//! assert_eq!(now.millis_since(exit), 61_000);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod error;
pub mod time;

// Re-export main types at crate root
pub use diagnostics::{CaptureSink, DiagnosticRecord, DiagnosticSink, Severity, StdoutSink};
pub use error::PlatformError;
pub use time::EpochMillis;
