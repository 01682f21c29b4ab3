//! Single-page navigation interception.
//!
//! Same-origin link clicks become history transitions plus notifications
//! instead of full page loads. Cross-origin links and clicks outside any
//! anchor are left to the default behavior.

use browser_env::{Document, Element, History};
use event_bus::{EventBus, PageEvent};
use std::sync::Arc;

/// What the interceptor did with a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Default navigation was suppressed; the session stays on this page.
    Intercepted {
        /// The path the session moved to.
        path: String,
    },
    /// A link outside this origin; default navigation proceeds.
    DefaultNavigation,
    /// No anchor in the ancestor chain, or an unresolvable href; nothing
    /// happens.
    Ignored,
}

/// Converts same-origin clicks and history traversal into route-change and
/// cache-refresh notifications.
pub struct NavigationInterceptor {
    document: Arc<Document>,
    history: Arc<History>,
    bus: Arc<EventBus>,
}

impl NavigationInterceptor {
    /// Creates an interceptor over the given document, history and bus.
    pub fn new(document: Arc<Document>, history: Arc<History>, bus: Arc<EventBus>) -> Self {
        Self {
            document,
            history,
            bus,
        }
    }

    /// Handles a click on `target`.
    ///
    /// Walks the ancestor chain for an anchor; resolves its href against
    /// the current document URL; same-origin destinations are pushed onto
    /// history and broadcast, anything else falls through.
    pub fn on_click(&self, target: &Element) -> ClickOutcome {
        let Some(anchor) = target.closest_anchor() else {
            return ClickOutcome::Ignored;
        };
        let Some(href) = anchor.href() else {
            return ClickOutcome::Ignored;
        };

        let page = self.document.url();
        let Ok(destination) = page.resolve(href) else {
            return ClickOutcome::Ignored;
        };

        if !page.is_same_origin(&destination) {
            self.history.record_full_navigation(destination);
            return ClickOutcome::DefaultNavigation;
        }

        let path = destination.path().to_string();
        self.history.push(destination.clone());
        self.document.set_url(destination);

        self.bus.publish(PageEvent::RouteChange { path: path.clone() });
        self.bus.publish(PageEvent::ForceCacheRefresh);

        ClickOutcome::Intercepted { path }
    }

    /// Handles history traversal: broadcasts the current path after the
    /// session moved (back/forward).
    pub fn on_popstate(&self) {
        let current = self.history.current();
        self.document.set_url(current.clone());

        self.bus.publish(PageEvent::RouteChange {
            path: current.path().to_string(),
        });
        self.bus.publish(PageEvent::ForceCacheRefresh);
    }
}
