//! Wall-clock timestamps with millisecond precision.
//!
//! All freshness heuristics compare instants measured in milliseconds since
//! the Unix epoch, which is also the unit the persisted keys store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An instant in time, in milliseconds since the Unix epoch.
///
/// Serializes as a bare integer so persisted values and wire payloads stay
/// interchangeable with the values the host page records.
///
/// # Examples
///
/// ```
/// use page_core::EpochMillis;
///
/// let t = EpochMillis::from_millis(5_000);
/// assert_eq!(t.plus(300_000).as_millis(), 305_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    /// The Unix epoch itself.
    pub const UNIX_EPOCH: EpochMillis = EpochMillis(0);

    /// Creates a timestamp from milliseconds since the Unix epoch.
    pub const fn from_millis(millis: i64) -> Self {
        EpochMillis(millis)
    }

    /// Returns the raw millisecond count.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns this instant shifted forward by `millis`, saturating on
    /// overflow.
    pub fn plus(self, millis: i64) -> Self {
        EpochMillis(self.0.saturating_add(millis))
    }

    /// Milliseconds elapsed from `earlier` to this instant.
    ///
    /// Negative when `earlier` is actually later; callers comparing against
    /// a threshold treat that as "not elapsed".
    pub fn millis_since(self, earlier: EpochMillis) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Parses a stored string value back into a timestamp.
    ///
    /// Persisted keys hold stringified integers; anything else is treated as
    /// an absent value.
    pub fn parse_stored(value: &str) -> Option<Self> {
        value.trim().parse::<i64>().ok().map(EpochMillis)
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
