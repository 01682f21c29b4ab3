//! Event dispatch and timer scheduling for the page runtime.
//!
//! This crate provides the coordination primitives between the runtime
//! components and the host application:
//! - [`PageEvent`] - the custom notifications with their wire names
//! - [`EventBus`] - publish/subscribe dispatch in registration order
//! - [`TimerQueue`] - deterministic one-shot and repeating timers
//!
//! # Overview
//!
//! Components never call each other. They publish [`PageEvent`]s on the bus
//! and react to external signals; timers are plain data advanced by the
//! runtime clock, so every firing is reproducible in tests.
//!
//! # Examples
//!
//! ```
//! use event_bus::{EventBus, EventKind, PageEvent};
//!
//! let bus = EventBus::new();
//! bus.subscribe(EventKind::ForceCacheRefresh, |_| {});
//! bus.publish(PageEvent::ForceCacheRefresh);
//! assert_eq!(bus.published(), vec![PageEvent::ForceCacheRefresh]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bus;
pub mod event;
pub mod timer;

// Re-export main types at crate root
pub use bus::EventBus;
pub use event::{EventKind, PageEvent};
pub use timer::{TimerFire, TimerId, TimerQueue};
