//! Bounded in-process cache.

use super::CacheStore;
use crate::error::CacheError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// LRU cache of byte values with per-entry expiry.
///
/// The least recently used entry is evicted once `capacity` is reached.
#[derive(Debug)]
pub struct MemoryCache {
    entries: Mutex<LruCache<String, Entry>>,
}

impl MemoryCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, LruCache<String, Entry>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Unavailable("memory cache lock poisoned".to_string()))
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut entries = self.lock()?;

        match entries.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => {}
            None => return Ok(None),
        }

        tracing::debug!("Cache entry {} expired", key);
        entries.pop(key);
        Ok(None)
    }

    fn put(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        self.lock()?
            .put(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    fn forget(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.pop(key);
        Ok(())
    }
}
