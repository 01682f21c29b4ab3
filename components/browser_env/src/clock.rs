//! Clock seam.
//!
//! Every timestamp the runtime records or compares comes through [`Clock`],
//! so sessions can be replayed at any point in time.

use page_core::EpochMillis;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> EpochMillis;
}

/// Clock backed by the system time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMillis {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        EpochMillis::from_millis(since_epoch.as_millis() as i64)
    }
}

/// Clock advanced by hand.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<EpochMillis>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: EpochMillis) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock to an absolute instant.
    pub fn set(&self, now: EpochMillis) {
        *self.now.lock().unwrap() = now;
    }

    /// Moves the clock forward by `millis` and returns the new instant.
    pub fn advance(&self, millis: i64) -> EpochMillis {
        let mut now = self.now.lock().unwrap();
        *now = now.plus(millis);
        *now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> EpochMillis {
        *self.now.lock().unwrap()
    }
}
