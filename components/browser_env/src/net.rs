//! Network probe seam.
//!
//! The staleness poller issues no-store probes against the page URL and
//! reads the server's `Last-Modified` header. The trait keeps the transport
//! out of the runtime; [`ScriptedProber`] replays staged outcomes and
//! records what was requested.

use crate::url::PageUrl;
use page_core::{EpochMillis, PlatformError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Parses an HTTP date header value (RFC 2822 / RFC 1123 form, e.g.
/// `Tue, 15 Nov 1994 08:12:31 GMT`) into epoch milliseconds.
pub fn parse_http_date(value: &str) -> Option<EpochMillis> {
    chrono::DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| EpochMillis::from_millis(dt.timestamp_millis()))
}

/// Response metadata from a probe. Probes are HEAD-equivalent, so there is
/// no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, as received.
    pub headers: HashMap<String, String>,
}

impl ProbeResponse {
    /// Creates a response with no headers.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Looks up a header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The server's `Last-Modified` time, when present and parseable.
    pub fn last_modified(&self) -> Option<EpochMillis> {
        self.header("Last-Modified").and_then(parse_http_date)
    }
}

/// Issues cache-bypassing probes.
pub trait NetworkProber: Send + Sync {
    /// Probes `url` with caches bypassed. The URL already carries its
    /// uniqueness stamp.
    fn probe(&self, url: &PageUrl) -> Result<ProbeResponse, PlatformError>;
}

/// Prober that replays staged outcomes in order.
///
/// Every request URL is recorded; running out of staged outcomes is itself
/// a network failure, which keeps an over-running scenario from panicking.
#[derive(Debug, Default)]
pub struct ScriptedProber {
    outcomes: Mutex<VecDeque<Result<ProbeResponse, PlatformError>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedProber {
    /// Creates a prober with nothing staged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a successful response.
    pub fn push_response(&self, response: ProbeResponse) {
        self.outcomes.lock().unwrap().push_back(Ok(response));
    }

    /// Stages a network failure.
    pub fn push_failure(&self, reason: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(PlatformError::NetworkFailure(reason.to_string())));
    }

    /// URLs probed so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl NetworkProber for ScriptedProber {
    fn probe(&self, url: &PageUrl) -> Result<ProbeResponse, PlatformError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(PlatformError::NetworkFailure(
                    "no response staged for probe".to_string(),
                ))
            })
    }
}
