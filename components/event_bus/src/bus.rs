//! Publish/subscribe dispatch for page notifications.
//!
//! The bus replaces the ambient global event target of the original page
//! scripts with an explicit, injectable object. Listeners for one kind fire
//! in registration order; ordering between listeners of different components
//! subscribed to the same kind is an implementation detail and must not be
//! relied upon.

use crate::event::{EventKind, PageEvent};
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

type Listener = Box<dyn Fn(&PageEvent) + Send + Sync>;

/// Publish/subscribe dispatcher for [`PageEvent`]s.
///
/// Every published event is also journaled, so tests and the simulator
/// shell can assert on exactly what the runtime broadcast.
pub struct EventBus {
    listeners: RwLock<HashMap<EventKind, Vec<Listener>>>,
    journal: Mutex<Vec<PageEvent>>,
}

impl EventBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            journal: Mutex::new(Vec::new()),
        }
    }

    /// Registers a listener for one event kind.
    ///
    /// Listeners must not subscribe from within a callback.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F)
    where
        F: Fn(&PageEvent) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap()
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    /// Publishes an event: journals it, then notifies listeners of its kind
    /// in registration order.
    pub fn publish(&self, event: PageEvent) {
        self.journal.lock().unwrap().push(event.clone());

        let listeners = self.listeners.read().unwrap();
        if let Some(registered) = listeners.get(&event.kind()) {
            for listener in registered {
                listener(&event);
            }
        }
    }

    /// Returns every event published so far, in publish order.
    pub fn published(&self) -> Vec<PageEvent> {
        self.journal.lock().unwrap().clone()
    }

    /// Number of published events of the given kind.
    pub fn published_count(&self, kind: EventKind) -> usize {
        self.journal
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }

    /// Discards the journal. Listener registrations are kept.
    pub fn clear_journal(&self) {
        self.journal.lock().unwrap().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("kinds", &self.listeners.read().unwrap().len())
            .field("published", &self.journal.lock().unwrap().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_publish_reaches_listener() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        bus.subscribe(EventKind::RouteChange, move |event| {
            s.lock().unwrap().push(event.clone());
        });

        bus.publish(PageEvent::RouteChange {
            path: "/a".to_string(),
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            PageEvent::RouteChange {
                path: "/a".to_string()
            }
        );
    }

    #[test]
    fn test_listener_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let o = order.clone();
            bus.subscribe(EventKind::SaveState, move |_| {
                o.lock().unwrap().push(tag);
            });
        }

        bus.publish(PageEvent::SaveState);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_kind_filtering() {
        let bus = EventBus::new();
        let hits = Arc::new(Mutex::new(0));

        let h = hits.clone();
        bus.subscribe(EventKind::ForceCacheRefresh, move |_| {
            *h.lock().unwrap() += 1;
        });

        bus.publish(PageEvent::SaveState);
        bus.publish(PageEvent::ForceCacheRefresh);
        bus.publish(PageEvent::RestoreState);

        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn test_journal() {
        let bus = EventBus::new();
        bus.publish(PageEvent::SaveState);
        bus.publish(PageEvent::ForceCacheRefresh);
        bus.publish(PageEvent::ForceCacheRefresh);

        assert_eq!(bus.published().len(), 3);
        assert_eq!(bus.published_count(EventKind::ForceCacheRefresh), 2);
        assert_eq!(bus.published_count(EventKind::RouteChange), 0);

        bus.clear_journal();
        assert!(bus.published().is_empty());
    }

    #[test]
    fn test_publish_without_listeners() {
        let bus = EventBus::new();
        // Must not panic or error
        bus.publish(PageEvent::FirstFrame);
        assert_eq!(bus.published_count(EventKind::FirstFrame), 1);
    }
}
