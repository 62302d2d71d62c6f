//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the CLI and server bootstrap code.
pub type Result<T> = anyhow::Result<T>;

/// Errors surfaced by the search core to its callers.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty or shorter than the configured minimum.
    #[error("Query must be at least {min_length} characters long")]
    Validation { min_length: usize },

    /// The query could not be turned into a pattern.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A page number or page size was out of range.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// The requested version is not among the configured versions.
    #[error("Unknown documentation version '{0}'")]
    UnknownVersion(String),

    /// The corpus provider could not supply pages.
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// Error returned when a corpus provider fails to load pages.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The corpus has no pages registered for a version.
    #[error("No documentation found for version '{0}'")]
    MissingVersion(String),

    /// Reading a corpus file failed.
    #[error("Failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A corpus file could not be parsed.
    #[error("Failed to parse corpus file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure inside a cache backend.
///
/// Never surfaced past the index cache: reads degrade to a rebuild and writes
/// are logged.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode cache entry: {0}")]
    Encode(#[source] postcard::Error),

    #[error("failed to decode cache entry: {0}")]
    Decode(#[source] postcard::Error),

    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
}
