//! Scenario files.
//!
//! A scenario is a JSON array of steps, each an external signal or a piece
//! of stage direction (advance the clock, stage a probe outcome, seed a
//! cache). Replaying one against a fresh session reproduces a full page
//! lifecycle deterministically.

use crate::error::CliResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One step of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// The page finishes loading.
    Load,
    /// The host renders its first frame.
    FirstFrame,
    /// The page is about to unload.
    Unload,
    /// The session moves back through history.
    Back,
    /// A click on an anchor with this href.
    Click {
        /// Anchor href, absolute or relative.
        href: String,
    },
    /// A click that lands outside any anchor.
    ClickOutsideAnchor,
    /// A cross-context message with this JSON payload.
    Message {
        /// The payload, kept as raw JSON.
        payload: serde_json::Value,
    },
    /// Move the clock forward and fire due timers.
    AdvanceClock {
        /// Milliseconds to advance by.
        ms: i64,
    },
    /// Stage the next probe response.
    StageResponse {
        /// HTTP status code.
        status: u16,
        /// Optional `Last-Modified` header value (RFC 2822 date).
        #[serde(default)]
        last_modified: Option<String>,
    },
    /// Stage the next probe as a network failure.
    StageFailure {
        /// Failure description.
        reason: String,
    },
    /// Create a named cache in the modeled storage.
    OpenCache {
        /// Cache name.
        name: String,
    },
}

/// Parses a scenario from a JSON string.
pub fn parse_scenario(json: &str) -> CliResult<Vec<ScenarioStep>> {
    Ok(serde_json::from_str(json)?)
}

/// Loads a scenario from a file.
pub fn load_scenario(path: impl AsRef<Path>) -> CliResult<Vec<ScenarioStep>> {
    let json = std::fs::read_to_string(path)?;
    parse_scenario(&json)
}
