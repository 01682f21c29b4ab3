//! Startup cache sweep.
//!
//! Deletes every named cache when the page loads. The host ships with this
//! switched off; it exists for deployments that want a cold cache on every
//! visit.

use crate::purge::{purge_named_caches, PurgeReport};
use browser_env::NamedCacheStore;
use page_core::DiagnosticSink;
use std::sync::Arc;

/// Clears all named caches at load when enabled.
pub struct StartupCacheSweeper {
    caches: Arc<dyn NamedCacheStore>,
    sink: Arc<dyn DiagnosticSink>,
    enabled: bool,
}

impl StartupCacheSweeper {
    /// Creates the sweeper.
    pub fn new(
        caches: Arc<dyn NamedCacheStore>,
        sink: Arc<dyn DiagnosticSink>,
        enabled: bool,
    ) -> Self {
        Self {
            caches,
            sink,
            enabled,
        }
    }

    /// Runs the sweep when enabled. Returns the report when it ran.
    pub fn on_load(&self) -> Option<PurgeReport> {
        if !self.enabled {
            return None;
        }
        let report = purge_named_caches(self.caches.as_ref(), self.sink.as_ref());
        self.sink.info(&format!(
            "startup sweep removed {} caches",
            report.deleted.len()
        ));
        Some(report)
    }
}
