//! Session orchestration for the simulator.
//!
//! A Session owns one page runtime on a manual clock with a scripted
//! prober, so scenarios and the interactive shell can drive a whole page
//! lifecycle deterministically and observe every notification it produces.

use crate::error::CliResult;
use crate::scenario::ScenarioStep;
use browser_env::{
    CacheStorage, Clock, Element, KeyValueStore, ManualClock, MemoryStore, NamedCacheStore,
    PageUrl, ProbeResponse, ScriptedProber,
};
use event_bus::PageEvent;
use lifecycle::{BrowserSignal, PageEnv, PageRuntime, PollOutcome, RuntimeConfig};
use page_core::{EpochMillis, StdoutSink};
use std::sync::{Arc, Mutex};

/// One simulated page session.
pub struct Session {
    runtime: PageRuntime,
    clock: Arc<ManualClock>,
    prober: Arc<ScriptedProber>,
    caches: Arc<CacheStorage>,
    store: Arc<MemoryStore>,
    journal_cursor: Mutex<usize>,
}

impl Session {
    /// Creates a session at the given URL and broadcasts the initial
    /// cache-refresh request, like the page scripts do at initialization.
    pub fn new(url: &str, config: RuntimeConfig) -> CliResult<Self> {
        let page_url = PageUrl::parse(url)?;
        let clock = Arc::new(ManualClock::new(EpochMillis::UNIX_EPOCH));
        let prober = Arc::new(ScriptedProber::new());
        let caches = Arc::new(CacheStorage::new());
        let store = Arc::new(MemoryStore::new());

        let env = PageEnv {
            store: store.clone(),
            caches: caches.clone(),
            clock: clock.clone(),
            prober: prober.clone(),
            sink: Arc::new(StdoutSink),
        };
        let runtime = PageRuntime::with_env(page_url, config, env);
        runtime.start();

        Ok(Self {
            runtime,
            clock,
            prober,
            caches,
            store,
            journal_cursor: Mutex::new(0),
        })
    }

    /// Applies one scenario step and returns the notifications it caused.
    pub fn apply(&self, step: &ScenarioStep) -> Vec<PageEvent> {
        match step {
            ScenarioStep::Load => self.runtime.handle_signal(BrowserSignal::Loaded),
            ScenarioStep::FirstFrame => self.runtime.handle_signal(BrowserSignal::FirstFrame),
            ScenarioStep::Unload => self.runtime.handle_signal(BrowserSignal::BeforeUnload),
            ScenarioStep::Back => self.runtime.handle_signal(BrowserSignal::PopState),
            ScenarioStep::Click { href } => self
                .runtime
                .handle_signal(BrowserSignal::Click(Element::anchor(href))),
            ScenarioStep::ClickOutsideAnchor => self
                .runtime
                .handle_signal(BrowserSignal::Click(Element::new("div"))),
            ScenarioStep::Message { payload } => self
                .runtime
                .handle_signal(BrowserSignal::Message(payload.to_string())),
            ScenarioStep::AdvanceClock { ms } => self.tick(*ms),
            ScenarioStep::StageResponse {
                status,
                last_modified,
            } => {
                let mut response = ProbeResponse::new(*status);
                if let Some(date) = last_modified {
                    response = response.with_header("Last-Modified", date);
                }
                self.prober.push_response(response);
            }
            ScenarioStep::StageFailure { reason } => self.prober.push_failure(reason),
            ScenarioStep::OpenCache { name } => {
                self.caches.open(name);
            }
        }
        self.take_new_events()
    }

    /// Moves the clock forward and fires due timers.
    pub fn tick(&self, ms: i64) {
        self.clock.advance(ms);
        self.runtime.pump_timers();
    }

    /// Runs one poll cycle immediately, off-schedule.
    pub fn poll(&self) -> PollOutcome {
        self.runtime.run_poll_cycle()
    }

    /// Notifications published since the last call.
    pub fn take_new_events(&self) -> Vec<PageEvent> {
        let published = self.runtime.bus().published();
        let mut cursor = self.journal_cursor.lock().unwrap();
        let new = published[*cursor..].to_vec();
        *cursor = published.len();
        new
    }

    /// Every notification published so far.
    pub fn all_events(&self) -> Vec<PageEvent> {
        self.runtime.bus().published()
    }

    /// Current cache names.
    pub fn cache_names(&self) -> Vec<String> {
        self.caches.names()
    }

    /// Persisted keys and values, sorted by key.
    pub fn storage_dump(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .store
            .keys()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|key| {
                let value = self.store.get(&key).ok().flatten()?;
                Some((key, value))
            })
            .collect();
        entries.sort();
        entries
    }

    /// The runtime under simulation.
    pub fn runtime(&self) -> &PageRuntime {
        &self.runtime
    }

    /// The manual clock driving the session.
    pub fn now(&self) -> EpochMillis {
        self.clock.now()
    }

    /// Replays a scenario, printing each step and the notifications it
    /// produced.
    pub fn run_scenario(&self, steps: &[ScenarioStep]) {
        for step in steps {
            println!("» {:?}", step);
            for event in self.apply(step) {
                println!("    {}", describe_event(&event));
            }
        }

        let reloads = self.runtime.history().reload_requests();
        if !reloads.is_empty() {
            println!("reload requested ({} total)", reloads.len());
        }
        println!(
            "final path: {}  caches: {:?}",
            self.runtime.history().current().path(),
            self.cache_names()
        );
    }
}

/// One-line rendering of a notification, wire name first.
pub fn describe_event(event: &PageEvent) -> String {
    match event {
        PageEvent::RouteChange { path } => format!("{} path={}", event.wire_name(), path),
        _ => event.wire_name().to_string(),
    }
}
