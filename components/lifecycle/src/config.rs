//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Thresholds, intervals and capability switches for a page session.
///
/// Every field has a default matching the stock page behavior, so partial
/// configuration files only name what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Delete every named cache at load. Off by default; present as a
    /// capability the host can switch on.
    pub sweep_on_startup: bool,
    /// Stamp script and stylesheet URLs with a version parameter at load.
    /// Off by default.
    pub stamp_resources: bool,
    /// Resource URLs to declare preload hints for at load.
    pub preload_resources: Vec<String>,
    /// Exit-to-return gap beyond which the restore path asks for a cache
    /// refresh.
    pub exit_gap_threshold_ms: i64,
    /// Teardown-to-load gap beyond which all named caches are purged.
    pub stale_after_ms: i64,
    /// Interval between staleness probes.
    pub poll_interval_ms: i64,
    /// Delay after load before the loading indicator is hidden.
    pub indicator_timeout_ms: i64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sweep_on_startup: false,
            stamp_resources: false,
            preload_resources: Vec::new(),
            exit_gap_threshold_ms: 60 * 1000,
            stale_after_ms: 5 * 60 * 1000,
            poll_interval_ms: 5 * 60 * 1000,
            indicator_timeout_ms: 3 * 1000,
        }
    }
}

impl RuntimeConfig {
    /// Parses a configuration from JSON, filling unnamed fields with
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
