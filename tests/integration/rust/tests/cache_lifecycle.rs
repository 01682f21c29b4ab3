//! Cache Lifecycle Integration Tests
//!
//! Tests sweep independence, the video cleanup set difference, and the
//! load-time utilities that rewrite head resources.

use browser_env::{CacheStorage, ManualClock, NamedCacheStore, PageUrl};
use lifecycle::{
    purge_named_caches, BrowserSignal, PageEnv, PageRuntime, RuntimeConfig,
};
use page_core::{CaptureSink, EpochMillis, Severity};
use std::sync::Arc;

fn runtime_with(
    config: RuntimeConfig,
    caches: Arc<CacheStorage>,
    sink: Arc<CaptureSink>,
) -> PageRuntime {
    let env = PageEnv {
        caches,
        sink,
        clock: Arc::new(ManualClock::new(EpochMillis::from_millis(500_000))),
        ..PageEnv::default()
    };
    PageRuntime::with_env(
        PageUrl::parse("https://app.example.com/").unwrap(),
        config,
        env,
    )
}

/// Test: sweeping with no failures leaves an empty cache set
#[test]
fn test_clean_sweep_empties_cache_set() {
    let caches = CacheStorage::new();
    for name in ["a", "b", "c", "d"] {
        caches.open(name);
    }
    let sink = CaptureSink::new();

    let report = purge_named_caches(&caches, &sink);

    assert!(caches.names().is_empty());
    assert!(report.is_clean());
    assert_eq!(report.attempted(), 4);
}

/// Test: deletion failures of an arbitrary proper subset do not block the
/// other deletions, and each failure is reported
#[test]
fn test_partial_failure_independence() {
    let caches = CacheStorage::new();
    for name in ["a", "b", "c", "d", "e"] {
        caches.open(name);
    }
    caches.fail_delete_of("b", "held open");
    caches.fail_delete_of("d", "quota pressure");
    let sink = CaptureSink::new();

    let report = purge_named_caches(&caches, &sink);

    assert_eq!(report.deleted, vec!["a", "c", "e"]);
    assert_eq!(report.failed, vec!["b", "d"]);
    assert_eq!(report.attempted(), 5);
    assert_eq!(caches.names(), vec!["b", "d"]);
    assert_eq!(sink.count(Severity::Warning), 2);
}

/// Test: a video cleanup message removes exactly the caches whose names
/// contain "video"
#[test]
fn test_video_cleanup_set_difference() {
    let caches = Arc::new(CacheStorage::new());
    let all = ["app-shell", "video-hd", "thumbs-video", "fonts", "videos"];
    for name in all {
        caches.open(name);
    }
    let runtime = runtime_with(
        RuntimeConfig::default(),
        caches.clone(),
        Arc::new(CaptureSink::new()),
    );

    runtime.handle_signal(BrowserSignal::Message(
        r#"{ "type": "videoOptimization", "action": "cleanupCache" }"#.to_string(),
    ));

    assert_eq!(caches.names(), vec!["app-shell", "fonts"]);
}

/// Test: a preload request from another context lands in the document head
#[test]
fn test_video_preload_message() {
    let caches = Arc::new(CacheStorage::new());
    let runtime = runtime_with(
        RuntimeConfig::default(),
        caches,
        Arc::new(CaptureSink::new()),
    );

    runtime.handle_signal(BrowserSignal::Message(
        r#"{ "type": "videoOptimization", "action": "preloadVideo", "url": "/clips/intro.mp4" }"#
            .to_string(),
    ));

    let preloads = runtime.document().head().preloads();
    assert_eq!(preloads.len(), 1);
    assert_eq!(preloads[0].href, "/clips/intro.mp4");
}

/// Test: malformed cross-context traffic changes nothing
#[test]
fn test_malformed_messages_change_nothing() {
    let caches = Arc::new(CacheStorage::new());
    caches.open("video-hd");
    let runtime = runtime_with(
        RuntimeConfig::default(),
        caches.clone(),
        Arc::new(CaptureSink::new()),
    );

    for payload in [
        "",
        "null",
        r#"{ "type": "videoOptimization" }"#,
        r#"{ "type": 17, "action": "cleanupCache" }"#,
    ] {
        runtime.handle_signal(BrowserSignal::Message(payload.to_string()));
    }

    assert!(caches.has("video-hd"));
    assert!(runtime.document().head().preloads().is_empty());
}

/// Test: the startup sweep capability clears caches at load when enabled
#[test]
fn test_startup_sweep_capability() {
    let caches = Arc::new(CacheStorage::new());
    caches.open("anything");
    let config = RuntimeConfig {
        sweep_on_startup: true,
        ..RuntimeConfig::default()
    };
    let runtime = runtime_with(config, caches.clone(), Arc::new(CaptureSink::new()));

    runtime.handle_signal(BrowserSignal::Loaded);
    assert!(caches.names().is_empty());
}

/// Test: version stamping rewrites only unversioned head resources
#[test]
fn test_version_stamping_at_load() {
    let caches = Arc::new(CacheStorage::new());
    let config = RuntimeConfig {
        stamp_resources: true,
        ..RuntimeConfig::default()
    };
    let runtime = runtime_with(config, caches, Arc::new(CaptureSink::new()));
    runtime.document().head().add_script("/main.dart.js");
    runtime.document().head().add_script("/vendor.js?v=44");
    runtime.document().head().add_stylesheet("/styles.css");

    runtime.handle_signal(BrowserSignal::Loaded);

    let scripts = runtime.document().head().scripts();
    assert!(scripts[0].starts_with("/main.dart.js?v="));
    assert_eq!(scripts[1], "/vendor.js?v=44");
    assert!(runtime.document().head().stylesheets()[0].starts_with("/styles.css?v="));
}
