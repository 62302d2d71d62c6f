//! Typed configuration for the search subsystem.
//!
//! Configuration is read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) yields a working in-memory setup.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Namespace placed in the first slot of the cache key format.
pub const INDEX_NAMESPACE: &str = "search-index";

/// Root configuration object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub versions: VersionsConfig,
    pub search: SearchConfig,
    pub cache: CacheConfig,
    pub corpus: CorpusConfig,
}

/// Documentation versions known to the registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionsConfig {
    /// Version used when a query does not name one.
    pub latest: String,
    /// All versions, in the order they are indexed.
    pub available: Vec<String>,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            latest: "6.0".to_string(),
            available: vec!["6.0".to_string(), "5.1".to_string(), "5.0".to_string()],
        }
    }
}

/// Query, ranking and snippet settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Minimum query length in characters.
    pub min_length: usize,
    /// Page size used when a query does not specify one.
    pub default_size: usize,
    /// Upper bound applied to explicit page sizes.
    pub max_size: usize,
    /// Maximum number of ranked results kept per query.
    pub max_results: usize,
    /// Snippet window radius, in characters, around the first match.
    pub snippet_length: usize,
    /// Front-matter keys folded into the `metadata` field, in order.
    pub metadata_fields: Vec<String>,
    pub index: IndexConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            default_size: 10,
            max_size: 100,
            max_results: 1000,
            snippet_length: 150,
            metadata_fields: ["description", "tags", "category", "author"]
                .into_iter()
                .map(String::from)
                .collect(),
            index: IndexConfig::default(),
        }
    }
}

/// Index caching policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Whether built indexes are cached at all.
    pub enabled: bool,
    /// Time-to-live in seconds. Zero keeps entries until cleared.
    pub ttl: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: 86_400,
        }
    }
}

impl IndexConfig {
    /// The TTL as a duration, `None` when entries never expire.
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl > 0).then(|| Duration::from_secs(self.ttl))
    }
}

/// Which cache backend stores built indexes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheDriver {
    #[default]
    Memory,
    File,
}

/// Cache backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Key format; `%s` placeholders receive the namespace and the version.
    pub key: String,
    pub driver: CacheDriver,
    /// Directory for the file driver. A leading `~` is expanded.
    pub path: Option<String>,
    /// Maximum number of entries held by the memory driver.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: "%s.%s".to_string(),
            driver: CacheDriver::Memory,
            path: None,
            capacity: 32,
        }
    }
}

impl CacheConfig {
    /// Build the cache key for a version's index.
    ///
    /// Placeholders are filled left to right with the namespace and the
    /// version. A format without placeholders is treated as a prefix.
    pub fn key_for(&self, version: &str) -> String {
        let mut args = [INDEX_NAMESPACE, version].into_iter();
        let mut pieces = self.key.split("%s");
        let mut key = pieces.next().unwrap_or_default().to_string();
        let mut filled = 0;

        for piece in pieces {
            if let Some(arg) = args.next() {
                key.push_str(arg);
                filled += 1;
            }
            key.push_str(piece);
        }

        if filled < 2 {
            // Keep keys unique per version even with a short format
            for arg in args {
                key.push('.');
                key.push_str(arg);
            }
        }
        key
    }

    /// Directory used by the file driver.
    pub fn directory(&self) -> PathBuf {
        match &self.path {
            Some(path) => PathBuf::from(expand_tilde(path).into_owned()),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("docsearch"),
        }
    }
}

/// Where the JSON corpus lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
    pub path: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: "pages".to_string(),
        }
    }
}

impl CorpusConfig {
    pub fn directory(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.path).into_owned())
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("No configuration file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration at {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.search.default_size == 0 {
            anyhow::bail!("search.default_size must be at least 1");
        }
        if self.search.max_size == 0 {
            anyhow::bail!("search.max_size must be at least 1");
        }
        if !self.versions.available.contains(&self.versions.latest) {
            anyhow::bail!(
                "versions.latest '{}' is not listed in versions.available",
                self.versions.latest
            );
        }
        Ok(())
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[rstest]
    #[case("%s.%s", "6.0", "search-index.6.0")]
    #[case("learn:%s:%s", "5.1", "learn:search-index:5.1")]
    #[case("docs", "6.0", "docs.search-index.6.0")]
    #[case("%s", "6.0", "search-index.6.0")]
    fn test_cache_key_format(#[case] format: &str, #[case] version: &str, #[case] expected: &str) {
        let cache = CacheConfig {
            key: format.to_string(),
            ..CacheConfig::default()
        };
        check!(cache.key_for(version) == expected);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        check!(config.search.min_length == 3);
        check!(config.search.default_size == 10);
        check!(config.search.max_results == 1000);
        check!(config.search.snippet_length == 150);
        check!(config.search.index.enabled);
        check!(config.cache.driver == CacheDriver::Memory);
        check!(config.versions.latest == "6.0");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = Config::from_toml(
            r#"
            [versions]
            latest = "2.0"
            available = ["2.0", "1.0"]

            [search]
            min_length = 2
            metadata_fields = ["summary"]

            [search.index]
            enabled = false
            ttl = 0

            [cache]
            driver = "file"
            path = "/tmp/docsearch-test"
            "#,
        )
        .unwrap();

        check!(config.versions.available == vec!["2.0".to_string(), "1.0".to_string()]);
        check!(config.search.min_length == 2);
        check!(config.search.default_size == 10);
        check!(config.search.metadata_fields == vec!["summary".to_string()]);
        check!(!config.search.index.enabled);
        check!(config.search.index.ttl().is_none());
        check!(config.cache.driver == CacheDriver::File);
        check!(config.cache.directory() == PathBuf::from("/tmp/docsearch-test"));
    }

    #[test]
    fn test_latest_must_be_available() {
        let result = Config::from_toml(
            r#"
            [versions]
            latest = "9.9"
            available = ["6.0"]
            "#,
        );
        let_assert!(Err(err) = result);
        check!(err.to_string().contains("9.9"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        check!(Config::from_toml("[search]\nminimum = 4\n").is_err());
    }

    #[test]
    fn test_ttl_duration() {
        let index = IndexConfig {
            enabled: true,
            ttl: 60,
        };
        check!(index.ttl() == Some(Duration::from_secs(60)));
    }
}
