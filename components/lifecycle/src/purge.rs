//! Named-cache purging.
//!
//! Deletions are independent per cache: one refusal is reported and the
//! loop moves on, so a single stuck cache never shields the rest.

use browser_env::NamedCacheStore;
use page_core::DiagnosticSink;

/// Result of a purge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Names whose deletion went through (or that were already gone).
    pub deleted: Vec<String>,
    /// Names whose deletion the platform refused.
    pub failed: Vec<String>,
}

impl PurgeReport {
    /// True when every attempted deletion went through.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of caches a deletion was attempted for.
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }
}

/// Deletes every named cache. Each deletion is attempted exactly once;
/// failures are reported and do not abort sibling deletions.
pub fn purge_named_caches(
    caches: &dyn NamedCacheStore,
    sink: &dyn DiagnosticSink,
) -> PurgeReport {
    purge_matching_caches(caches, sink, |_| true)
}

/// Deletes every named cache whose name satisfies `predicate`, with the
/// same independence guarantees as [`purge_named_caches`].
pub fn purge_matching_caches(
    caches: &dyn NamedCacheStore,
    sink: &dyn DiagnosticSink,
    predicate: impl Fn(&str) -> bool,
) -> PurgeReport {
    let mut report = PurgeReport::default();

    for name in caches.names() {
        if !predicate(&name) {
            continue;
        }
        match caches.delete(&name) {
            Ok(_) => report.deleted.push(name),
            Err(err) => {
                sink.warn(&err.to_string());
                report.failed.push(name);
            }
        }
    }

    report
}
