//! Custom page notifications.
//!
//! These are the notifications exchanged between the runtime and the host
//! application. The wire names are an external contract and must not change
//! across versions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A custom notification published on the [`crate::EventBus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageEvent {
    /// The page path changed without a full navigation.
    RouteChange {
        /// New path, origin-relative.
        path: String,
    },
    /// The host should refresh any cached application data.
    ForceCacheRefresh,
    /// The host should persist its transient state before teardown.
    SaveState,
    /// The host should restore previously saved state.
    RestoreState,
    /// The host finished rendering its first frame. Consumed by the runtime,
    /// never produced by it.
    FirstFrame,
}

impl PageEvent {
    /// The discriminant used for subscriptions.
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::RouteChange { .. } => EventKind::RouteChange,
            PageEvent::ForceCacheRefresh => EventKind::ForceCacheRefresh,
            PageEvent::SaveState => EventKind::SaveState,
            PageEvent::RestoreState => EventKind::RestoreState,
            PageEvent::FirstFrame => EventKind::FirstFrame,
        }
    }

    /// The notification name on the wire.
    pub fn wire_name(&self) -> &'static str {
        self.kind().wire_name()
    }
}

/// Discriminant of a [`PageEvent`], used to register subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// [`PageEvent::RouteChange`]
    RouteChange,
    /// [`PageEvent::ForceCacheRefresh`]
    ForceCacheRefresh,
    /// [`PageEvent::SaveState`]
    SaveState,
    /// [`PageEvent::RestoreState`]
    RestoreState,
    /// [`PageEvent::FirstFrame`]
    FirstFrame,
}

impl EventKind {
    /// The notification name on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            EventKind::RouteChange => "flutter-route-change",
            EventKind::ForceCacheRefresh => "force-cache-refresh",
            EventKind::SaveState => "flutter-save-state",
            EventKind::RestoreState => "flutter-restore-state",
            EventKind::FirstFrame => "flutter-first-frame",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
