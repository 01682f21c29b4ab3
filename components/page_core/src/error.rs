//! Error taxonomy for platform primitives.
//!
//! Every failure in the runtime degrades to a no-op plus a diagnostic
//! report; these types carry the report. None of them is ever allowed to
//! take the page down.

use std::fmt;

/// Errors raised by the modeled platform primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The key-value or cache storage primitive is not available in this
    /// context; the dependent action is skipped.
    StorageUnavailable,
    /// A network probe failed or timed out.
    NetworkFailure(String),
    /// Deletion of a single named cache failed. Sibling deletions proceed
    /// independently.
    CacheDeletion {
        /// Name of the cache that could not be deleted.
        cache: String,
        /// Underlying reason, for diagnostics only.
        reason: String,
    },
    /// A cross-context message did not match the expected shape.
    MalformedMessage(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::StorageUnavailable => {
                write!(f, "storage is unavailable in this context")
            }
            PlatformError::NetworkFailure(msg) => write!(f, "network failure: {}", msg),
            PlatformError::CacheDeletion { cache, reason } => {
                write!(f, "failed to delete cache '{}': {}", cache, reason)
            }
            PlatformError::MalformedMessage(msg) => write!(f, "malformed message: {}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}
