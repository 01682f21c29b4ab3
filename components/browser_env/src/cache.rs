//! Named cache storage.
//!
//! Models the origin-scoped set of named caches: enumerable, individually
//! deletable, each holding the URLs of cached responses. Deletion is
//! fallible per name, and the in-memory implementation can stage failures
//! for specific names so partial-failure behavior can be exercised.

use page_core::PlatformError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

// ============================================================================
// Cache
// ============================================================================

/// A single named cache holding the URLs of cached responses.
pub struct Cache {
    name: String,
    entries: RwLock<HashSet<String>>,
}

impl Cache {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: RwLock::new(HashSet::new()),
        }
    }

    /// The cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records a cached response URL.
    pub fn insert(&self, url: &str) {
        self.entries.write().unwrap().insert(url.to_string());
    }

    /// Returns true when the URL has a cached response.
    pub fn contains(&self, url: &str) -> bool {
        self.entries.read().unwrap().contains(url)
    }

    /// All cached URLs, in no particular order.
    pub fn urls(&self) -> Vec<String> {
        self.entries.read().unwrap().iter().cloned().collect()
    }

    /// Number of cached responses.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true when the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.name)
            .field("entry_count", &self.len())
            .finish()
    }
}

// ============================================================================
// Cache storage
// ============================================================================

/// The set of named caches for one origin.
pub trait NamedCacheStore: Send + Sync {
    /// Opens a cache, creating it when absent.
    fn open(&self, name: &str) -> Arc<Cache>;

    /// All cache names, in creation order.
    fn names(&self) -> Vec<String>;

    /// Returns true when a cache with this name exists.
    fn has(&self, name: &str) -> bool;

    /// Deletes one cache. `Ok(true)` when it existed, `Ok(false)` when it
    /// did not; `Err` when the platform refused the deletion. A failed
    /// deletion leaves the cache in place and has no effect on others.
    fn delete(&self, name: &str) -> Result<bool, PlatformError>;
}

/// In-memory cache storage.
///
/// Deletion failures can be staged per name with [`CacheStorage::fail_delete_of`];
/// this models the browser refusing a deletion (quota pressure, a cache
/// held open elsewhere) without giving the failure a global switch.
pub struct CacheStorage {
    caches: RwLock<Vec<(String, Arc<Cache>)>>,
    failing: RwLock<HashMap<String, String>>,
}

impl CacheStorage {
    /// Creates empty cache storage.
    pub fn new() -> Self {
        Self {
            caches: RwLock::new(Vec::new()),
            failing: RwLock::new(HashMap::new()),
        }
    }

    /// Stages a deletion failure for one cache name. Subsequent deletes of
    /// that name fail with the given reason until the entry is cleared.
    pub fn fail_delete_of(&self, name: &str, reason: &str) {
        self.failing
            .write()
            .unwrap()
            .insert(name.to_string(), reason.to_string());
    }

    /// Clears a staged deletion failure.
    pub fn clear_delete_failure(&self, name: &str) {
        self.failing.write().unwrap().remove(name);
    }

    /// Number of caches present.
    pub fn len(&self) -> usize {
        self.caches.read().unwrap().len()
    }

    /// Returns true when no caches exist.
    pub fn is_empty(&self) -> bool {
        self.caches.read().unwrap().is_empty()
    }
}

impl Default for CacheStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NamedCacheStore for CacheStorage {
    fn open(&self, name: &str) -> Arc<Cache> {
        let mut caches = self.caches.write().unwrap();
        if let Some((_, cache)) = caches.iter().find(|(n, _)| n == name) {
            return Arc::clone(cache);
        }
        let cache = Arc::new(Cache::new(name.to_string()));
        caches.push((name.to_string(), Arc::clone(&cache)));
        cache
    }

    fn names(&self) -> Vec<String> {
        self.caches
            .read()
            .unwrap()
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    fn has(&self, name: &str) -> bool {
        self.caches.read().unwrap().iter().any(|(n, _)| n == name)
    }

    fn delete(&self, name: &str) -> Result<bool, PlatformError> {
        if let Some(reason) = self.failing.read().unwrap().get(name) {
            return Err(PlatformError::CacheDeletion {
                cache: name.to_string(),
                reason: reason.clone(),
            });
        }
        let mut caches = self.caches.write().unwrap();
        let before = caches.len();
        caches.retain(|(n, _)| n != name);
        Ok(caches.len() != before)
    }
}

impl std::fmt::Debug for CacheStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStorage")
            .field("cache_count", &self.len())
            .finish()
    }
}
