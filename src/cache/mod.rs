//! Generic TTL key-value cache backends.
//!
//! The index cache stores each version's serialized index under one key.
//! Backends only move opaque bytes around; every `put` replaces the previous
//! value for its key as a whole.

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use crate::config::{CacheConfig, CacheDriver};
use crate::error::CacheError;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

/// A byte-oriented key-value store with per-entry expiry.
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry. Expired entries read as absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value`, replacing any previous entry. `None` never expires.
    fn put(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Remove an entry. Removing a missing key is not an error.
    fn forget(&self, key: &str) -> Result<(), CacheError>;
}

/// Build the backend selected by the `[cache]` configuration.
pub fn from_config(config: &CacheConfig) -> Arc<dyn CacheStore> {
    match config.driver {
        CacheDriver::Memory => {
            let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
            Arc::new(MemoryCache::new(capacity))
        }
        CacheDriver::File => Arc::new(FileCache::new(config.directory())),
    }
}
