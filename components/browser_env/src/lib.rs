//! Models of the browser primitives the page runtime runs against.
//!
//! Implements the platform surface the freshness heuristics need: page URLs
//! and origins, named Cache Storage, origin-scoped key-value storage, session
//! history, the document with its head resources and loading indicator, the
//! network probe seam, and the clock seam.
//!
//! Everything here is an in-process model with trait seams, so the runtime
//! can be driven deterministically: the clock is manual, the prober is
//! scripted, and cache deletion failures can be staged per name.

pub mod cache;
pub mod clock;
pub mod dom;
pub mod history;
pub mod net;
pub mod storage;
pub mod url;

// Re-export main types
pub use cache::{Cache, CacheStorage, NamedCacheStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dom::{Document, DocumentHead, Element, LoadingIndicator, PreloadHint, PreloadKind};
pub use history::{History, ReloadRequest};
pub use net::{parse_http_date, NetworkProber, ProbeResponse, ScriptedProber};
pub use storage::{KeyValueStore, MemoryStore, UnavailableStore};
pub use url::{append_param, has_param, PageUrl, UrlError};
