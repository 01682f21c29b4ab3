//! The page runtime.
//!
//! Owns the modeled environment and the components, and routes the
//! well-defined external signals to them: lifecycle events, clicks,
//! cross-context messages and timer ticks. Probe completions are delivered
//! back into the poller within the same turn; nothing here blocks.

use crate::config::RuntimeConfig;
use crate::navigation::NavigationInterceptor;
use crate::preloader::ResourcePreloader;
use crate::staleness::{PollOutcome, StalenessPoller};
use crate::stamper::ResourceVersionStamper;
use crate::state::PageLifecycleState;
use crate::state_bridge::StateLifecycleBridge;
use crate::sweeper::StartupCacheSweeper;
use crate::video_bridge::VideoOptimizationBridge;
use browser_env::{
    CacheStorage, Clock, Document, Element, History, KeyValueStore, MemoryStore, NamedCacheStore,
    NetworkProber, PageUrl, ScriptedProber, SystemClock,
};
use event_bus::{EventBus, PageEvent, TimerId, TimerQueue};
use page_core::{DiagnosticSink, StdoutSink};
use std::sync::{Arc, Mutex};

/// An external signal driving the runtime.
#[derive(Debug, Clone)]
pub enum BrowserSignal {
    /// The page finished loading.
    Loaded,
    /// The host rendered its first frame.
    FirstFrame,
    /// The page is about to unload.
    BeforeUnload,
    /// The session moved back through history.
    PopState,
    /// A click landed on this element.
    Click(Element),
    /// A cross-context message arrived with this payload.
    Message(String),
}

/// The modeled platform the runtime runs against.
///
/// Defaults give a fresh in-memory environment on the system clock with an
/// empty scripted prober, so probes fail until responses are staged.
pub struct PageEnv {
    /// Origin-scoped key-value storage.
    pub store: Arc<dyn KeyValueStore>,
    /// Named cache storage.
    pub caches: Arc<dyn NamedCacheStore>,
    /// Wall clock.
    pub clock: Arc<dyn Clock>,
    /// Probe transport.
    pub prober: Arc<dyn NetworkProber>,
    /// Diagnostic destination.
    pub sink: Arc<dyn DiagnosticSink>,
}

impl Default for PageEnv {
    fn default() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            caches: Arc::new(CacheStorage::new()),
            clock: Arc::new(SystemClock),
            prober: Arc::new(ScriptedProber::new()),
            sink: Arc::new(StdoutSink),
        }
    }
}

/// One page session: environment, components and timers.
pub struct PageRuntime {
    config: RuntimeConfig,
    document: Arc<Document>,
    history: Arc<History>,
    caches: Arc<dyn NamedCacheStore>,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DiagnosticSink>,
    prober: Arc<dyn NetworkProber>,
    state: PageLifecycleState,

    interceptor: NavigationInterceptor,
    state_bridge: StateLifecycleBridge,
    poller: StalenessPoller,
    video_bridge: VideoOptimizationBridge,
    sweeper: StartupCacheSweeper,
    stamper: ResourceVersionStamper,
    preloader: ResourcePreloader,

    timers: Mutex<TimerQueue>,
    poll_timer: Mutex<Option<TimerId>>,
    indicator_timer: Mutex<Option<TimerId>>,
}

impl PageRuntime {
    /// Creates a runtime over a default in-memory environment.
    pub fn new(initial_url: PageUrl, config: RuntimeConfig) -> Self {
        Self::with_env(initial_url, config, PageEnv::default())
    }

    /// Creates a runtime over an explicit environment.
    pub fn with_env(initial_url: PageUrl, config: RuntimeConfig, env: PageEnv) -> Self {
        let document = Arc::new(Document::new(initial_url.clone()));
        let history = Arc::new(History::new(initial_url));
        let bus = Arc::new(EventBus::new());
        let state = PageLifecycleState::new(env.store);

        let interceptor =
            NavigationInterceptor::new(document.clone(), history.clone(), bus.clone());
        let state_bridge = StateLifecycleBridge::new(
            state.clone(),
            bus.clone(),
            env.clock.clone(),
            env.sink.clone(),
            config.exit_gap_threshold_ms,
        );
        let poller = StalenessPoller::new(
            state.clone(),
            document.clone(),
            history.clone(),
            env.caches.clone(),
            env.clock.clone(),
            env.sink.clone(),
            config.stale_after_ms,
        );
        let video_bridge = VideoOptimizationBridge::new(
            document.clone(),
            env.caches.clone(),
            env.sink.clone(),
        );
        let sweeper = StartupCacheSweeper::new(
            env.caches.clone(),
            env.sink.clone(),
            config.sweep_on_startup,
        );
        let stamper = ResourceVersionStamper::new(
            document.clone(),
            env.clock.clone(),
            config.stamp_resources,
        );
        let preloader = ResourcePreloader::new(
            document.clone(),
            env.clock.clone(),
            config.preload_resources.clone(),
        );

        Self {
            config,
            document,
            history,
            caches: env.caches,
            bus,
            clock: env.clock,
            sink: env.sink,
            prober: env.prober,
            state,
            interceptor,
            state_bridge,
            poller,
            video_bridge,
            sweeper,
            stamper,
            preloader,
            timers: Mutex::new(TimerQueue::new()),
            poll_timer: Mutex::new(None),
            indicator_timer: Mutex::new(None),
        }
    }

    /// Script initialization: broadcasts the initial cache-refresh request.
    pub fn start(&self) {
        self.bus.publish(PageEvent::ForceCacheRefresh);
    }

    /// Routes one external signal.
    pub fn handle_signal(&self, signal: BrowserSignal) {
        match signal {
            BrowserSignal::Loaded => self.on_loaded(),
            BrowserSignal::FirstFrame => self.state_bridge.on_first_frame(),
            BrowserSignal::BeforeUnload => {
                self.state_bridge.on_unload();
                self.poller.on_unload();
            }
            BrowserSignal::PopState => {
                self.history.back();
                self.interceptor.on_popstate();
            }
            BrowserSignal::Click(target) => {
                self.interceptor.on_click(&target);
            }
            BrowserSignal::Message(payload) => {
                self.video_bridge.on_message(&payload);
            }
        }
    }

    fn on_loaded(&self) {
        self.sweeper.on_load();
        self.stamper.on_load();
        self.preloader.on_load();
        self.poller.on_load();

        let now = self.clock.now();
        let mut timers = self.timers.lock().unwrap();
        *self.indicator_timer.lock().unwrap() =
            Some(timers.schedule_once(now.plus(self.config.indicator_timeout_ms)));
        *self.poll_timer.lock().unwrap() = Some(timers.schedule_repeating(
            now.plus(self.config.poll_interval_ms),
            self.config.poll_interval_ms,
        ));
    }

    /// Fires every timer due at the current clock reading.
    pub fn pump_timers(&self) {
        let fires = {
            let mut timers = self.timers.lock().unwrap();
            timers.advance_to(self.clock.now())
        };
        for fire in fires {
            self.on_timer(fire.id);
        }
    }

    fn on_timer(&self, id: TimerId) {
        if *self.indicator_timer.lock().unwrap() == Some(id) {
            if self.document.loading_indicator().hide() {
                self.sink.info("loading indicator hidden");
            }
        } else if *self.poll_timer.lock().unwrap() == Some(id) {
            self.run_poll_cycle();
        }
    }

    /// Runs one poll cycle to completion: begins the cycle, issues the
    /// probe, and delivers the result back to the poller.
    pub fn run_poll_cycle(&self) -> PollOutcome {
        let url = self.poller.begin_cycle();
        let result = self.prober.probe(&url);
        self.poller.complete_cycle(result)
    }

    /// The event bus carrying the custom notifications.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// The modeled document.
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// The session history.
    pub fn history(&self) -> &Arc<History> {
        &self.history
    }

    /// The named cache storage.
    pub fn caches(&self) -> &Arc<dyn NamedCacheStore> {
        &self.caches
    }

    /// The persisted lifecycle timestamps.
    pub fn state(&self) -> &PageLifecycleState {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The wall clock the session runs on.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
