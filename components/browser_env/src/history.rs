//! Session history.
//!
//! Models the history stack the interceptor pushes onto, plus the two exits
//! from single-page navigation: forced reloads and full (default)
//! navigations. Both are recorded rather than performed, so a session can
//! assert exactly which ones a scenario produced.

use crate::url::PageUrl;
use std::sync::Mutex;

/// A recorded request to reload the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadRequest {
    /// True when the reload must bypass HTTP caches.
    pub bypass_cache: bool,
}

/// The session history for one page.
///
/// The initial entry is held apart from the pushed ones, so the stack can
/// never be observed empty.
#[derive(Debug)]
pub struct History {
    initial: PageUrl,
    pushed: Mutex<Vec<PageUrl>>,
    reloads: Mutex<Vec<ReloadRequest>>,
    full_navigations: Mutex<Vec<PageUrl>>,
}

impl History {
    /// Creates a history whose only entry is the initial page URL.
    pub fn new(initial: PageUrl) -> Self {
        Self {
            initial,
            pushed: Mutex::new(Vec::new()),
            reloads: Mutex::new(Vec::new()),
            full_navigations: Mutex::new(Vec::new()),
        }
    }

    /// Pushes a new entry (pushState).
    pub fn push(&self, url: PageUrl) {
        self.pushed.lock().unwrap().push(url);
    }

    /// The entry the session currently sits on.
    pub fn current(&self) -> PageUrl {
        self.pushed
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_else(|| self.initial.clone())
    }

    /// Steps back one entry and returns the new current one. Returns None
    /// at the first entry, where back leaves the session.
    pub fn back(&self) -> Option<PageUrl> {
        let mut pushed = self.pushed.lock().unwrap();
        pushed.pop()?;
        Some(pushed.last().cloned().unwrap_or_else(|| self.initial.clone()))
    }

    /// Number of entries on the stack, the initial one included.
    pub fn len(&self) -> usize {
        1 + self.pushed.lock().unwrap().len()
    }

    /// Returns false; the stack always holds the initial entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Records a request for a full page reload.
    pub fn request_reload(&self, bypass_cache: bool) {
        self.reloads.lock().unwrap().push(ReloadRequest { bypass_cache });
    }

    /// All reload requests, in request order.
    pub fn reload_requests(&self) -> Vec<ReloadRequest> {
        self.reloads.lock().unwrap().clone()
    }

    /// Records a default navigation that was left to the browser.
    pub fn record_full_navigation(&self, url: PageUrl) {
        self.full_navigations.lock().unwrap().push(url);
    }

    /// All default navigations, in occurrence order.
    pub fn full_navigations(&self) -> Vec<PageUrl> {
        self.full_navigations.lock().unwrap().clone()
    }
}
