//! Documentation version registry.

use crate::config::VersionsConfig;
use crate::error::SearchError;

/// Resolves requested versions against the versions the site publishes.
pub trait VersionRegistry: Send + Sync {
    /// Resolve an explicit version, or the latest one when `None`.
    fn resolve(&self, version: Option<&str>) -> Result<String, SearchError>;

    /// Every known version, in indexing order.
    fn versions(&self) -> Vec<String>;
}

/// Registry backed by the `[versions]` configuration table.
#[derive(Debug, Clone)]
pub struct ConfiguredVersions {
    latest: String,
    available: Vec<String>,
}

impl ConfiguredVersions {
    pub fn new(latest: impl Into<String>, available: Vec<String>) -> Self {
        Self {
            latest: latest.into(),
            available,
        }
    }

    pub fn from_config(config: &VersionsConfig) -> Self {
        Self::new(config.latest.clone(), config.available.clone())
    }
}

impl VersionRegistry for ConfiguredVersions {
    fn resolve(&self, version: Option<&str>) -> Result<String, SearchError> {
        let requested = version.unwrap_or(&self.latest);

        if self.available.iter().any(|v| v == requested) {
            Ok(requested.to_string())
        } else {
            Err(SearchError::UnknownVersion(requested.to_string()))
        }
    }

    fn versions(&self) -> Vec<String> {
        self.available.clone()
    }
}
