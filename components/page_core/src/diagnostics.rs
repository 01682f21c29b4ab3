//! Diagnostic reporting seam.
//!
//! Failures in the runtime are never fatal; they are reported through a
//! [`DiagnosticSink`] and the operation degrades to a no-op. The sink is a
//! trait so tests can capture reports instead of printing them.

use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational progress report.
    Info,
    /// A degraded operation: something was skipped or partially failed.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single captured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    /// Report severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

/// Destination for diagnostic reports.
pub trait DiagnosticSink: Send + Sync {
    /// Delivers one report to the sink.
    fn report(&self, severity: Severity, message: &str);

    /// Reports at [`Severity::Info`].
    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    /// Reports at [`Severity::Warning`].
    fn warn(&self, message: &str) {
        self.report(Severity::Warning, message);
    }
}

/// Sink that prints reports to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn report(&self, severity: Severity, message: &str) {
        println!("[{}] {}", severity, message);
    }
}

/// Sink that captures reports in memory.
///
/// Used by tests and by the simulator shell to inspect what the runtime
/// reported during a session.
#[derive(Debug, Default)]
pub struct CaptureSink {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl CaptureSink {
    /// Creates an empty capturing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all captured records, in report order.
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Returns just the captured messages, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Number of reports at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    /// Discards all captured records.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl DiagnosticSink for CaptureSink {
    fn report(&self, severity: Severity, message: &str) {
        self.records.lock().unwrap().push(DiagnosticRecord {
            severity,
            message: message.to_string(),
        });
    }
}
