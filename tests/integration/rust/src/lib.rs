//! Integration test suite for the page freshness runtime.
//!
//! Verifies that the components work together correctly across component
//! boundaries: navigation interception, staleness polling, cache
//! lifecycle, and full scenario-driven sessions.

/// Re-export components for test convenience
pub mod components {
    pub use browser_env;
    pub use event_bus;
    pub use lifecycle;
    pub use page_cli;
    pub use page_core;
}
