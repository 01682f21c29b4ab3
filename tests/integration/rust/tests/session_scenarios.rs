//! Scenario-Driven Session Tests
//!
//! Drives full page sessions through the simulator facade, the same path
//! the `pagefresh` binary uses.

use event_bus::{EventKind, PageEvent};
use lifecycle::RuntimeConfig;
use page_cli::{scenario::parse_scenario, ScenarioStep, Session};

fn fresh_session() -> Session {
    Session::new("https://app.example.test/", RuntimeConfig::default()).unwrap()
}

/// Test: session initialization broadcasts one cache refresh before any
/// signal arrives
#[test]
fn test_initialization_broadcast() {
    let session = fresh_session();
    assert_eq!(
        session.take_new_events(),
        vec![PageEvent::ForceCacheRefresh]
    );
}

/// Test: an exit gap over a minute produces exactly one refresh on the
/// restore path, a shorter one produces none
#[test]
fn test_exit_gap_boundary() {
    let long_gap = fresh_session();
    long_gap.apply(&ScenarioStep::Unload);
    long_gap.apply(&ScenarioStep::AdvanceClock { ms: 61_000 });
    long_gap.take_new_events();
    let events = long_gap.apply(&ScenarioStep::FirstFrame);
    assert_eq!(
        events,
        vec![PageEvent::RestoreState, PageEvent::ForceCacheRefresh]
    );

    let short_gap = fresh_session();
    short_gap.apply(&ScenarioStep::Unload);
    short_gap.apply(&ScenarioStep::AdvanceClock { ms: 59_000 });
    short_gap.take_new_events();
    let events = short_gap.apply(&ScenarioStep::FirstFrame);
    assert_eq!(events, vec![PageEvent::RestoreState]);
}

/// Test: the loading indicator is hidden three seconds after load, ready
/// or not
#[test]
fn test_indicator_hidden_after_three_seconds() {
    let session = fresh_session();
    session.apply(&ScenarioStep::Load);
    assert!(session
        .runtime()
        .document()
        .loading_indicator()
        .is_visible());

    session.apply(&ScenarioStep::AdvanceClock { ms: 3_000 });
    assert!(!session
        .runtime()
        .document()
        .loading_indicator()
        .is_visible());
}

/// Test: a whole browsing session parsed from scenario JSON behaves like
/// the sum of its parts
#[test]
fn test_full_session_scenario() {
    let session = fresh_session();
    let steps = parse_scenario(
        r#"[
            { "step": "open_cache", "name": "assets" },
            { "step": "open_cache", "name": "video-clips" },
            { "step": "load" },
            { "step": "first_frame" },
            { "step": "click", "href": "/inbox" },
            { "step": "click", "href": "/inbox/42" },
            { "step": "back" },
            { "step": "message",
              "payload": { "type": "videoOptimization", "action": "cleanupCache" } },
            { "step": "unload" }
        ]"#,
    )
    .unwrap();

    for step in &steps {
        session.apply(step);
    }

    let runtime = session.runtime();
    assert_eq!(runtime.history().current().path(), "/inbox");
    assert_eq!(session.cache_names(), vec!["assets"]);
    assert_eq!(runtime.bus().published_count(EventKind::RouteChange), 3);
    assert_eq!(runtime.bus().published_count(EventKind::SaveState), 1);
    assert!(runtime.history().full_navigations().is_empty());

    let keys: Vec<String> = session
        .storage_dump()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        keys,
        vec![
            "lastExitTimestamp",
            "lastLoadTimestamp",
            "lastRefreshTimestamp"
        ]
    );
}

/// Test: the poller reloads across two sessions without looping, because
/// the observed time is persisted before the reload
#[test]
fn test_reload_does_not_loop_across_sessions() {
    let session = fresh_session();
    let steps = parse_scenario(
        r#"[
            { "step": "load" },
            { "step": "stage_response", "status": 200,
              "last_modified": "Mon, 03 Apr 2023 10:00:00 GMT" },
            { "step": "advance_clock", "ms": 300000 },
            { "step": "stage_response", "status": 200,
              "last_modified": "Mon, 03 Apr 2023 11:00:00 GMT" },
            { "step": "advance_clock", "ms": 300000 }
        ]"#,
    )
    .unwrap();
    for step in &steps {
        session.apply(step);
    }
    assert_eq!(session.runtime().history().reload_requests().len(), 1);

    // The reloaded page polls again and sees the same modification time:
    // no further reload.
    session.apply(&ScenarioStep::StageResponse {
        status: 200,
        last_modified: Some("Mon, 03 Apr 2023 11:00:00 GMT".to_string()),
    });
    session.apply(&ScenarioStep::AdvanceClock { ms: 300_000 });
    assert_eq!(session.runtime().history().reload_requests().len(), 1);
}

/// Test: independent listeners of one kind observe events in registration
/// order
#[test]
fn test_listener_ordering_for_host_integrations() {
    use std::sync::{Arc, Mutex};

    let session = fresh_session();
    let order = Arc::new(Mutex::new(Vec::new()));

    for tag in ["analytics", "router"] {
        let o = order.clone();
        session
            .runtime()
            .bus()
            .subscribe(EventKind::RouteChange, move |_| {
                o.lock().unwrap().push(tag);
            });
    }

    session.apply(&ScenarioStep::Click {
        href: "/anywhere".to_string(),
    });

    assert_eq!(*order.lock().unwrap(), vec!["analytics", "router"]);
}
