//! Save/restore state bridging across page teardown.
//!
//! The host application saves its transient state when the page is about to
//! unload and restores it when the next session renders its first frame. A
//! long gap between the two means whatever the host cached is suspect, so
//! the bridge also asks for a cache refresh.

use crate::state::PageLifecycleState;
use browser_env::Clock;
use event_bus::{EventBus, PageEvent};
use page_core::DiagnosticSink;
use std::sync::Arc;

/// Bridges unload and first-frame into save/restore notifications and the
/// exit-gap refresh check.
pub struct StateLifecycleBridge {
    state: PageLifecycleState,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DiagnosticSink>,
    exit_gap_threshold_ms: i64,
}

impl StateLifecycleBridge {
    /// Creates the bridge. `exit_gap_threshold_ms` is the exit-to-return
    /// gap beyond which the restore path asks for a cache refresh.
    pub fn new(
        state: PageLifecycleState,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn DiagnosticSink>,
        exit_gap_threshold_ms: i64,
    ) -> Self {
        Self {
            state,
            bus,
            clock,
            sink,
            exit_gap_threshold_ms,
        }
    }

    /// Page teardown: tell the host to save, then record when we left.
    /// Storage being unavailable skips the record without failing.
    pub fn on_unload(&self) {
        self.bus.publish(PageEvent::SaveState);

        if self.state.record_exit(self.clock.now()).is_err() {
            self.sink.warn("exit timestamp not recorded, storage unavailable");
        }
    }

    /// First frame of a new session: tell the host to restore, then ask for
    /// a cache refresh when the previous session ended too long ago.
    pub fn on_first_frame(&self) {
        self.bus.publish(PageEvent::RestoreState);

        let last_exit = match self.state.last_exit() {
            Ok(value) => value,
            Err(_) => {
                self.sink.warn("exit timestamp not readable, storage unavailable");
                return;
            }
        };

        if let Some(exit) = last_exit {
            let gap = self.clock.now().millis_since(exit);
            if gap > self.exit_gap_threshold_ms {
                self.sink.info(&format!(
                    "last session ended {}ms ago, requesting cache refresh",
                    gap
                ));
                self.bus.publish(PageEvent::ForceCacheRefresh);
            }
        }
    }
}
