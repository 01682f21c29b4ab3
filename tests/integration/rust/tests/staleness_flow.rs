//! Staleness Flow Integration Tests
//!
//! Tests the timer-driven poll cycle end to end: interval firing, probe
//! stamping, Last-Modified comparison, reload requests, and the load-time
//! stale-session purge.

use browser_env::{
    CacheStorage, Clock, ManualClock, MemoryStore, NamedCacheStore, PageUrl, ProbeResponse,
    ScriptedProber,
};
use lifecycle::{BrowserSignal, PageEnv, PageRuntime, RuntimeConfig};
use page_core::{CaptureSink, EpochMillis};
use std::sync::Arc;

const POLL_INTERVAL: i64 = 300_000;

const OLD_DATE: &str = "Mon, 03 Apr 2023 10:00:00 GMT";
const NEW_DATE: &str = "Mon, 03 Apr 2023 11:30:00 GMT";

struct World {
    clock: Arc<ManualClock>,
    prober: Arc<ScriptedProber>,
    caches: Arc<CacheStorage>,
    store: Arc<MemoryStore>,
    runtime: PageRuntime,
}

fn world() -> World {
    let clock = Arc::new(ManualClock::new(EpochMillis::from_millis(10_000_000)));
    let prober = Arc::new(ScriptedProber::new());
    let caches = Arc::new(CacheStorage::new());
    let store = Arc::new(MemoryStore::new());
    let env = PageEnv {
        store: store.clone(),
        caches: caches.clone(),
        clock: clock.clone(),
        prober: prober.clone(),
        sink: Arc::new(CaptureSink::new()),
    };
    let runtime = PageRuntime::with_env(
        PageUrl::parse("https://app.example.com/dashboard").unwrap(),
        RuntimeConfig::default(),
        env,
    );
    World {
        clock,
        prober,
        caches,
        store,
        runtime,
    }
}

impl World {
    fn tick(&self, ms: i64) {
        self.clock.advance(ms);
        self.runtime.pump_timers();
    }
}

/// Test: a strictly newer Last-Modified triggers exactly one
/// cache-bypassing reload
#[test]
fn test_server_change_reloads_exactly_once() {
    let w = world();
    w.prober
        .push_response(ProbeResponse::new(200).with_header("Last-Modified", OLD_DATE));
    w.prober
        .push_response(ProbeResponse::new(200).with_header("Last-Modified", NEW_DATE));

    w.runtime.handle_signal(BrowserSignal::Loaded);
    w.tick(POLL_INTERVAL);
    assert!(w.runtime.history().reload_requests().is_empty());

    w.tick(POLL_INTERVAL);
    let reloads = w.runtime.history().reload_requests();
    assert_eq!(reloads.len(), 1);
    assert!(reloads[0].bypass_cache);
}

/// Test: an unchanged Last-Modified never reloads, however often it is
/// observed
#[test]
fn test_unchanged_server_never_reloads() {
    let w = world();
    for _ in 0..4 {
        w.prober
            .push_response(ProbeResponse::new(200).with_header("Last-Modified", OLD_DATE));
    }

    w.runtime.handle_signal(BrowserSignal::Loaded);
    for _ in 0..4 {
        w.tick(POLL_INTERVAL);
    }

    assert!(w.runtime.history().reload_requests().is_empty());
    assert_eq!(w.prober.requests().len(), 4);
}

/// Test: probe failures keep the recorded value, and a later success picks
/// up where the poller left off
#[test]
fn test_failure_then_recovery() {
    let w = world();
    w.prober
        .push_response(ProbeResponse::new(200).with_header("Last-Modified", OLD_DATE));
    w.prober.push_failure("connection reset");
    w.prober
        .push_response(ProbeResponse::new(200).with_header("Last-Modified", NEW_DATE));

    w.runtime.handle_signal(BrowserSignal::Loaded);
    w.tick(POLL_INTERVAL);
    w.tick(POLL_INTERVAL);
    assert!(w.runtime.history().reload_requests().is_empty());

    w.tick(POLL_INTERVAL);
    assert_eq!(w.runtime.history().reload_requests().len(), 1);
}

/// Test: every probe URL is the page URL with a fresh uniqueness stamp
#[test]
fn test_probe_urls_are_uniquely_stamped() {
    let w = world();
    w.prober.push_failure("offline");
    w.prober.push_failure("offline");

    w.runtime.handle_signal(BrowserSignal::Loaded);
    w.tick(POLL_INTERVAL);
    w.tick(POLL_INTERVAL);

    let requests = w.prober.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("https://app.example.com/dashboard?_="));
    assert_ne!(requests[0], requests[1]);
}

/// Test: returning to a page torn down longer than the threshold ago
/// purges every named cache
#[test]
fn test_stale_return_purges_caches() {
    let w = world();
    w.caches.open("assets-v3");
    w.caches.open("api-responses");

    w.runtime.handle_signal(BrowserSignal::BeforeUnload);
    w.clock.advance(300_001);
    w.runtime.handle_signal(BrowserSignal::Loaded);

    assert!(w.caches.names().is_empty());
}

/// Test: a quick return keeps the caches
#[test]
fn test_quick_return_keeps_caches() {
    let w = world();
    w.caches.open("assets-v3");

    w.runtime.handle_signal(BrowserSignal::BeforeUnload);
    w.clock.advance(299_999);
    w.runtime.handle_signal(BrowserSignal::Loaded);

    assert!(w.caches.has("assets-v3"));
}

/// Test: the persisted keys hold the expected stringified timestamps after
/// a full unload/load round trip
#[test]
fn test_persisted_key_contract() {
    let w = world();
    w.runtime.handle_signal(BrowserSignal::BeforeUnload);
    let teardown = w.clock.now();
    w.clock.advance(1_000);
    w.runtime.handle_signal(BrowserSignal::Loaded);

    let get = |key: &str| {
        use browser_env::KeyValueStore;
        w.store.get(key).unwrap()
    };
    assert_eq!(get("lastExitTimestamp"), Some(teardown.to_string()));
    assert_eq!(get("lastRefreshTimestamp"), Some(teardown.to_string()));
    assert_eq!(get("lastLoadTimestamp"), Some(w.clock.now().to_string()));
    assert_eq!(get("lastCheckedModifiedTime"), None);
}

/// Test: the recorded modified time survives in storage under its contract
/// key after a poll
#[test]
fn test_checked_modified_time_is_persisted() {
    let w = world();
    w.prober
        .push_response(ProbeResponse::new(200).with_header("Last-Modified", OLD_DATE));

    w.runtime.handle_signal(BrowserSignal::Loaded);
    w.tick(POLL_INTERVAL);

    use browser_env::KeyValueStore;
    let stored = w.store.get("lastCheckedModifiedTime").unwrap();
    let expected = ProbeResponse::new(200)
        .with_header("Last-Modified", OLD_DATE)
        .last_modified()
        .unwrap();
    assert_eq!(stored, Some(expected.to_string()));
}
