//! The persisted lifecycle timestamps.
//!
//! A thin, typed view over the origin-scoped key-value store. The key names
//! are an external contract; values are stringified epoch milliseconds.
//! Each key has exactly one writer component, so the racing-writer hazard
//! of sharing raw keys never arises: readers go through the `last_*`
//! accessors, and each `record_*` method documents its owner.

use browser_env::KeyValueStore;
use page_core::{EpochMillis, PlatformError};
use std::sync::Arc;

/// Key holding the instant the user last left the page.
pub const LAST_EXIT_TIMESTAMP: &str = "lastExitTimestamp";
/// Key holding the instant the page was last torn down.
pub const LAST_REFRESH_TIMESTAMP: &str = "lastRefreshTimestamp";
/// Key holding the instant the page was last loaded. Diagnostic only.
pub const LAST_LOAD_TIMESTAMP: &str = "lastLoadTimestamp";
/// Key holding the last server modification time a poll observed.
pub const LAST_CHECKED_MODIFIED_TIME: &str = "lastCheckedModifiedTime";

/// Typed access to the persisted lifecycle timestamps.
///
/// Cheap to clone; all clones share the same underlying store.
#[derive(Clone)]
pub struct PageLifecycleState {
    store: Arc<dyn KeyValueStore>,
}

impl PageLifecycleState {
    /// Wraps a key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Result<Option<EpochMillis>, PlatformError> {
        // A value that does not parse as an integer is treated as absent;
        // external writers may have left anything in the store.
        Ok(self
            .store
            .get(key)?
            .as_deref()
            .and_then(EpochMillis::parse_stored))
    }

    fn write(&self, key: &str, value: EpochMillis) -> Result<(), PlatformError> {
        self.store.set(key, &value.to_string())
    }

    /// When the user last left the page.
    pub fn last_exit(&self) -> Result<Option<EpochMillis>, PlatformError> {
        self.read(LAST_EXIT_TIMESTAMP)
    }

    /// When the page was last torn down.
    pub fn last_refresh(&self) -> Result<Option<EpochMillis>, PlatformError> {
        self.read(LAST_REFRESH_TIMESTAMP)
    }

    /// When the page was last loaded.
    pub fn last_load(&self) -> Result<Option<EpochMillis>, PlatformError> {
        self.read(LAST_LOAD_TIMESTAMP)
    }

    /// The last server modification time a poll observed.
    pub fn last_checked_modified(&self) -> Result<Option<EpochMillis>, PlatformError> {
        self.read(LAST_CHECKED_MODIFIED_TIME)
    }

    /// Records the exit instant. Writer: the state lifecycle bridge, at
    /// unload.
    pub fn record_exit(&self, now: EpochMillis) -> Result<(), PlatformError> {
        self.write(LAST_EXIT_TIMESTAMP, now)
    }

    /// Records the teardown instant. Writer: the staleness poller, at
    /// unload.
    pub fn record_refresh(&self, now: EpochMillis) -> Result<(), PlatformError> {
        self.write(LAST_REFRESH_TIMESTAMP, now)
    }

    /// Records the load instant. Writer: the staleness poller, at load.
    pub fn record_load(&self, now: EpochMillis) -> Result<(), PlatformError> {
        self.write(LAST_LOAD_TIMESTAMP, now)
    }

    /// Records an observed server modification time. Writer: the staleness
    /// poller, per cycle.
    pub fn record_checked_modified(&self, time: EpochMillis) -> Result<(), PlatformError> {
        self.write(LAST_CHECKED_MODIFIED_TIME, time)
    }
}

impl std::fmt::Debug for PageLifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLifecycleState").finish_non_exhaustive()
    }
}
