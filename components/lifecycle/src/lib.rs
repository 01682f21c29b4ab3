//! Page freshness and lifecycle heuristics.
//!
//! Implements the runtime components that keep a long-lived single-page
//! session fresh: navigation interception, save/restore state bridging,
//! staleness polling with forced reloads, startup cache sweeping, resource
//! version stamping, resource preloading, and the video optimization
//! message bridge. Components coordinate only through the event bus and the
//! persisted timestamps; [`PageRuntime`] wires them to external signals.

pub mod config;
pub mod navigation;
pub mod preloader;
pub mod purge;
pub mod runtime;
pub mod staleness;
pub mod stamper;
pub mod state;
pub mod state_bridge;
pub mod sweeper;
pub mod video_bridge;

// Re-export main types
pub use config::RuntimeConfig;
pub use navigation::{ClickOutcome, NavigationInterceptor};
pub use preloader::ResourcePreloader;
pub use purge::{purge_matching_caches, purge_named_caches, PurgeReport};
pub use runtime::{BrowserSignal, PageEnv, PageRuntime};
pub use staleness::{PollOutcome, PollState, StalenessPoller};
pub use stamper::ResourceVersionStamper;
pub use state::PageLifecycleState;
pub use state_bridge::StateLifecycleBridge;
pub use sweeper::StartupCacheSweeper;
pub use video_bridge::{MessageOutcome, VideoOptimizationBridge};
