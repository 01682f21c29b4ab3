//! Navigation Flow Integration Tests
//!
//! Tests the complete click-to-notification flow: element ancestry walk,
//! origin check, history push, document URL update, and the notifications
//! the host observes on the bus.

use browser_env::{Element, ManualClock, PageUrl};
use event_bus::{EventKind, PageEvent};
use lifecycle::{BrowserSignal, PageEnv, PageRuntime, RuntimeConfig};
use page_core::EpochMillis;
use std::sync::{Arc, Mutex};

fn runtime_at(url: &str) -> PageRuntime {
    let env = PageEnv {
        clock: Arc::new(ManualClock::new(EpochMillis::from_millis(1_000_000))),
        ..PageEnv::default()
    };
    PageRuntime::with_env(PageUrl::parse(url).unwrap(), RuntimeConfig::default(), env)
}

/// Test: a same-origin click never performs a full navigation and produces
/// exactly one history push and one route-change notification
#[test]
fn test_same_origin_click_is_fully_intercepted() {
    let runtime = runtime_at("https://app.example.com/home");

    runtime.handle_signal(BrowserSignal::Click(Element::anchor("/reports")));

    assert!(runtime.history().full_navigations().is_empty());
    assert_eq!(runtime.history().len(), 2);
    assert_eq!(runtime.document().url().path(), "/reports");
    assert_eq!(runtime.bus().published_count(EventKind::RouteChange), 1);
    assert_eq!(
        runtime.bus().published(),
        vec![
            PageEvent::RouteChange {
                path: "/reports".to_string()
            },
            PageEvent::ForceCacheRefresh,
        ]
    );
}

/// Test: a cross-origin click leaves default navigation untouched and
/// publishes nothing
#[test]
fn test_cross_origin_click_is_untouched() {
    let runtime = runtime_at("https://app.example.com/home");

    runtime.handle_signal(BrowserSignal::Click(Element::anchor(
        "https://elsewhere.example.net/page",
    )));

    assert_eq!(runtime.history().len(), 1);
    assert_eq!(runtime.history().full_navigations().len(), 1);
    assert_eq!(runtime.document().url().path(), "/home");
    assert!(runtime.bus().published().is_empty());
}

/// Test: clicks with no anchor in the ancestor chain do nothing at all
#[test]
fn test_click_outside_any_anchor_is_inert() {
    let runtime = runtime_at("https://app.example.com/home");
    let target = Element::new("main").child("section").child("p");

    runtime.handle_signal(BrowserSignal::Click(target));

    assert_eq!(runtime.history().len(), 1);
    assert!(runtime.history().full_navigations().is_empty());
    assert!(runtime.bus().published().is_empty());
}

/// Test: the click target may be arbitrarily deep inside the anchor
#[test]
fn test_nested_click_target_resolves_through_ancestors() {
    let runtime = runtime_at("https://app.example.com/home");
    let anchor = Element::anchor("https://app.example.com/gallery");
    let target = anchor.child("figure").child("img");

    runtime.handle_signal(BrowserSignal::Click(target));

    assert_eq!(runtime.document().url().path(), "/gallery");
    assert_eq!(runtime.history().len(), 2);
}

/// Test: back broadcasts the restored path plus a cache refresh, and the
/// host listener sees them in order
#[test]
fn test_back_notifies_host_listeners_in_order() {
    let runtime = runtime_at("https://app.example.com/home");
    let seen = Arc::new(Mutex::new(Vec::new()));

    let s = seen.clone();
    runtime.bus().subscribe(EventKind::RouteChange, move |event| {
        if let PageEvent::RouteChange { path } = event {
            s.lock().unwrap().push(path.clone());
        }
    });

    runtime.handle_signal(BrowserSignal::Click(Element::anchor("/a")));
    runtime.handle_signal(BrowserSignal::Click(Element::anchor("/b")));
    runtime.handle_signal(BrowserSignal::PopState);

    assert_eq!(*seen.lock().unwrap(), vec!["/a", "/b", "/a"]);
    assert_eq!(runtime.document().url().path(), "/a");
}

/// Test: every intercepted transition also asks for a cache refresh
#[test]
fn test_each_transition_requests_cache_refresh() {
    let runtime = runtime_at("https://app.example.com/home");

    runtime.handle_signal(BrowserSignal::Click(Element::anchor("/a")));
    runtime.handle_signal(BrowserSignal::PopState);

    assert_eq!(
        runtime.bus().published_count(EventKind::ForceCacheRefresh),
        2
    );
}
