//! Origin-scoped key-value storage.
//!
//! Models the durable string store the page persists its timestamps in.
//! The trait seam exists so an unavailable store can be swapped in: every
//! operation then fails with `StorageUnavailable` and the caller degrades
//! to a no-op.

use page_core::PlatformError;
use std::collections::HashMap;
use std::sync::RwLock;

/// Durable string-to-string storage scoped to the page origin.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;

    /// Writes a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError>;

    /// All keys currently present, in no particular order.
    fn keys(&self) -> Result<Vec<String>, PlatformError>;
}

/// In-memory store with the semantics of the browser's durable storage:
/// created on first write, overwritten indefinitely, never expired.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true when no key was ever written.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PlatformError> {
        Ok(self.entries.read().unwrap().keys().cloned().collect())
    }
}

/// Store standing in for a context where the storage primitive failed
/// feature detection. Every operation reports `StorageUnavailable`.
#[derive(Debug, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PlatformError> {
        Err(PlatformError::StorageUnavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PlatformError> {
        Err(PlatformError::StorageUnavailable)
    }

    fn keys(&self) -> Result<Vec<String>, PlatformError> {
        Err(PlatformError::StorageUnavailable)
    }
}
