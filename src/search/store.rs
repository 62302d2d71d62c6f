//! Per-version index storage on top of a [`CacheStore`].
//!
//! Each version's index is postcard-encoded and written under a single key,
//! so a rebuild swaps the whole index at once. Backend failures never reach
//! the caller: an unreadable entry is rebuilt and a failed write is logged.

use super::indexer::Indexer;
use crate::cache::CacheStore;
use crate::config::{CacheConfig, IndexConfig};
use crate::error::{CacheError, SearchError};
use crate::types::IndexedPage;
use std::sync::Arc;
use std::time::Duration;

/// Cached indexes keyed by documentation version.
pub struct IndexCache {
    store: Arc<dyn CacheStore>,
    keys: CacheConfig,
    enabled: bool,
    ttl: Option<Duration>,
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("key", &self.keys.key)
            .field("enabled", &self.enabled)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl IndexCache {
    pub fn new(store: Arc<dyn CacheStore>, keys: CacheConfig, index: IndexConfig) -> Self {
        Self {
            store,
            keys,
            enabled: index.enabled,
            ttl: index.ttl(),
        }
    }

    /// Cache key holding `version`'s index.
    pub fn key_for(&self, version: &str) -> String {
        self.keys.key_for(version)
    }

    /// The index for `version`, building it through `indexer` on a miss.
    ///
    /// With caching disabled the index is rebuilt on every call.
    pub fn get(&self, version: &str, indexer: &Indexer) -> Result<Arc<[IndexedPage]>, SearchError> {
        if let Some(pages) = self.lookup(version) {
            return Ok(pages);
        }

        tracing::debug!("Index cache miss for {}", version);
        let pages = indexer.index_version(version)?;
        self.put(version, &pages);
        Ok(pages.into())
    }

    /// Whether a live index for `version` is stored.
    pub fn is_cached(&self, version: &str) -> bool {
        self.lookup(version).is_some()
    }

    /// Store `pages` as the index of `version`, replacing any previous one.
    pub fn put(&self, version: &str, pages: &[IndexedPage]) {
        if !self.enabled {
            return;
        }

        let key = self.key_for(version);
        let result = postcard::to_stdvec(pages)
            .map_err(CacheError::Encode)
            .and_then(|bytes| self.store.put(&key, bytes, self.ttl));

        match result {
            Ok(()) => tracing::debug!("Cached index for {} under '{}'", version, key),
            Err(e) => tracing::warn!("Failed to cache index for {}: {}", version, e),
        }
    }

    /// Drop the cached index of each version in `versions`.
    ///
    /// Returns the versions whose entries were evicted. Nothing is evicted
    /// while caching is disabled.
    pub fn clear<'a>(&self, versions: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        if !self.enabled {
            tracing::debug!("Index caching disabled, nothing to clear");
            return Vec::new();
        }

        let mut cleared = Vec::new();
        for version in versions {
            let key = self.key_for(version);
            match self.store.forget(&key) {
                Ok(()) => cleared.push(version),
                Err(e) => tracing::warn!("Failed to clear cached index for {}: {}", version, e),
            }
        }

        if !cleared.is_empty() {
            tracing::info!("Cleared search index for {}", cleared.join(", "));
        }
        cleared
    }

    fn lookup(&self, version: &str) -> Option<Arc<[IndexedPage]>> {
        if !self.enabled {
            return None;
        }

        let key = self.key_for(version);
        let bytes = match self.store.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read cached index for {}: {}", version, e);
                return None;
            }
        };

        match postcard::from_bytes::<Vec<IndexedPage>>(&bytes) {
            Ok(pages) => Some(pages.into()),
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable cached index for {}: {}",
                    version,
                    CacheError::Decode(e)
                );
                None
            }
        }
    }
}
