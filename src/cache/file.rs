//! Cache persisted as one file per key.
//!
//! Files are named by the xxh3 hash of their key and hold a postcard-encoded
//! envelope with the key, the expiry and the payload. Writes go to a
//! temporary file that is renamed over the target, so readers never see a
//! partially written entry.

use super::CacheStore;
use crate::error::CacheError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use xxhash_rust::xxh3::xxh3_64;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    key: String,
    /// Expiry as milliseconds since the Unix epoch.
    expires_at: Option<u64>,
    payload: Vec<u8>,
}

/// File-system cache rooted at a directory.
#[derive(Debug)]
pub struct FileCache {
    dir: PathBuf,
    write_seq: AtomicU64,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_seq: AtomicU64::new(0),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{:016x}.cache", xxh3_64(key.as_bytes())))
    }

    fn io_error(path: &Path, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&path, e)),
        };

        let envelope: Envelope = postcard::from_bytes(&bytes).map_err(CacheError::Decode)?;

        if envelope.key != key {
            tracing::debug!("Cache file {} belongs to another key", path.display());
            return Ok(None);
        }

        if envelope.expires_at.is_some_and(|at| now_millis() >= at) {
            tracing::debug!("Cache entry {} expired, removing {}", key, path.display());
            let _ = std::fs::remove_file(&path);
            return Ok(None);
        }

        Ok(Some(envelope.payload))
    }

    fn put(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;

        let expires_at = ttl.map(|ttl| {
            now_millis().saturating_add(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
        });
        let envelope = Envelope {
            key: key.to_string(),
            expires_at,
            payload: value,
        };
        let bytes = postcard::to_stdvec(&envelope).map_err(CacheError::Encode)?;

        let path = self.entry_path(key);
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let tmp_path = path.with_extension(format!("tmp-{}-{}", std::process::id(), seq));

        if let Err(e) = std::fs::write(&tmp_path, &bytes) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(Self::io_error(&tmp_path, e));
        }
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(Self::io_error(&path, e));
        }

        tracing::debug!("Cached {} bytes for {} at {}", bytes.len(), key, path.display());
        Ok(())
    }

    fn forget(&self, key: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}
