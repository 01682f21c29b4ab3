//! Staleness polling and the stale-session purge.
//!
//! Two independent freshness checks share this component:
//!
//! - a periodic probe of the current page URL that forces a full,
//!   cache-bypassing reload when the server's `Last-Modified` time moved
//!   forward past the recorded one, and
//! - a one-shot check at load that purges every named cache when the page
//!   had been torn down more than the staleness threshold ago.
//!
//! Both exist in the original page behavior and neither subsumes the other.

use crate::purge::{purge_named_caches, PurgeReport};
use crate::state::PageLifecycleState;
use browser_env::{Clock, Document, History, NamedCacheStore, PageUrl, ProbeResponse};
use page_core::{DiagnosticSink, EpochMillis, PlatformError};
use std::sync::{Arc, Mutex};

/// Where the poller is within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Waiting for the next interval tick.
    Idle,
    /// A probe is in flight; its completion has not been delivered yet.
    Probing,
}

impl PollState {
    /// True while a probe is in flight.
    pub fn is_probing(&self) -> bool {
        matches!(self, PollState::Probing)
    }
}

/// How one poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The page changed server-side; a cache-bypassing reload was
    /// requested. Terminal for the session.
    ReloadRequested,
    /// A modification time was recorded for the first time.
    Recorded(EpochMillis),
    /// Nothing newer was observed; the recorded value stands.
    Unchanged,
    /// The probe failed; the recorded value stands.
    Failed,
}

/// Periodic page-change detection plus the load-time staleness purge.
pub struct StalenessPoller {
    state: PageLifecycleState,
    document: Arc<Document>,
    history: Arc<History>,
    caches: Arc<dyn NamedCacheStore>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DiagnosticSink>,
    stale_after_ms: i64,
    cycle: Mutex<PollState>,
}

impl StalenessPoller {
    /// Creates a poller. `stale_after_ms` is the teardown-to-load gap
    /// beyond which the load check purges all named caches.
    pub fn new(
        state: PageLifecycleState,
        document: Arc<Document>,
        history: Arc<History>,
        caches: Arc<dyn NamedCacheStore>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn DiagnosticSink>,
        stale_after_ms: i64,
    ) -> Self {
        Self {
            state,
            document,
            history,
            caches,
            clock,
            sink,
            stale_after_ms,
            cycle: Mutex::new(PollState::Idle),
        }
    }

    /// Current cycle state.
    pub fn poll_state(&self) -> PollState {
        *self.cycle.lock().unwrap()
    }

    /// Load-time check: records the load instant, then purges every named
    /// cache when the page had been torn down more than the staleness
    /// threshold ago. Returns the purge report when a purge ran.
    pub fn on_load(&self) -> Option<PurgeReport> {
        let now = self.clock.now();

        if self.state.record_load(now).is_err() {
            self.sink.warn("load timestamp not recorded, storage unavailable");
        }

        let last_refresh = match self.state.last_refresh() {
            Ok(value) => value?,
            Err(_) => {
                self.sink.warn("refresh timestamp not readable, storage unavailable");
                return None;
            }
        };

        let gap = now.millis_since(last_refresh);
        if gap <= self.stale_after_ms {
            return None;
        }

        self.sink.info(&format!(
            "page last refreshed {}ms ago, purging named caches",
            gap
        ));
        let report = purge_named_caches(self.caches.as_ref(), self.sink.as_ref());
        self.sink.info(&format!(
            "purged {} caches, {} failed",
            report.deleted.len(),
            report.failed.len()
        ));
        Some(report)
    }

    /// Teardown: record when this session ended.
    pub fn on_unload(&self) {
        if self.state.record_refresh(self.clock.now()).is_err() {
            self.sink.warn("refresh timestamp not recorded, storage unavailable");
        }
    }

    /// Interval tick: moves Idle to Probing and returns the URL to probe,
    /// the current page URL stamped with a uniqueness parameter. A tick
    /// that lands while a probe is still unresolved abandons that cycle
    /// and starts a fresh one.
    pub fn begin_cycle(&self) -> PageUrl {
        let mut cycle = self.cycle.lock().unwrap();
        if cycle.is_probing() {
            self.sink.warn("previous probe never completed, starting a new cycle");
        }
        *cycle = PollState::Probing;

        self.document
            .url()
            .with_query_param("_", &self.clock.now().to_string())
    }

    /// Delivers the probe completion and finishes the cycle.
    pub fn complete_cycle(
        &self,
        result: Result<ProbeResponse, PlatformError>,
    ) -> PollOutcome {
        let mut cycle = self.cycle.lock().unwrap();
        if !cycle.is_probing() {
            self.sink.warn("probe completion delivered with no probe in flight");
            return PollOutcome::Failed;
        }
        *cycle = PollState::Idle;
        drop(cycle);

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.sink.warn(&format!("page update check failed: {}", err));
                return PollOutcome::Failed;
            }
        };

        let Some(modified) = response.last_modified() else {
            return PollOutcome::Unchanged;
        };

        let recorded = match self.state.last_checked_modified() {
            Ok(value) => value,
            Err(_) => {
                self.sink.warn("modified time not readable, storage unavailable");
                return PollOutcome::Unchanged;
            }
        };

        match recorded {
            None => {
                self.record_modified(modified);
                PollOutcome::Recorded(modified)
            }
            Some(previous) if modified > previous => {
                // Persist before requesting the reload so the next session
                // does not see the old value and reload again.
                self.record_modified(modified);
                self.sink.info("page changed server-side, reloading");
                self.history.request_reload(true);
                PollOutcome::ReloadRequested
            }
            Some(_) => PollOutcome::Unchanged,
        }
    }

    fn record_modified(&self, modified: EpochMillis) {
        if self.state.record_checked_modified(modified).is_err() {
            self.sink.warn("modified time not recorded, storage unavailable");
        }
    }
}
