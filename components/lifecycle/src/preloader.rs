//! Resource preloading.
//!
//! Declares a preload hint for each configured resource at load. Each URL
//! is stamped with a `_={now}` uniqueness parameter so the early fetch
//! bypasses stale cache entries; the preload kind comes from the extension.

use browser_env::{append_param, Clock, Document, PreloadHint, PreloadKind};
use std::sync::Arc;

/// Declares preload hints for a configured resource list.
pub struct ResourcePreloader {
    document: Arc<Document>,
    clock: Arc<dyn Clock>,
    resources: Vec<String>,
}

impl ResourcePreloader {
    /// Creates a preloader over a static resource list.
    pub fn new(document: Arc<Document>, clock: Arc<dyn Clock>, resources: Vec<String>) -> Self {
        Self {
            document,
            clock,
            resources,
        }
    }

    /// Registers one hint per configured resource. Returns the number of
    /// hints added.
    pub fn on_load(&self) -> usize {
        let stamp = self.clock.now().to_string();
        let head = self.document.head();

        for resource in &self.resources {
            head.add_preload(PreloadHint {
                kind: PreloadKind::for_url(resource),
                href: append_param(resource, "_", &stamp),
            });
        }
        self.resources.len()
    }
}
