//! Corpus backed by one JSON page tree per version.
//!
//! Each version lives in `<root>/<version>.json`, a JSON array of page nodes:
//!
//! ```json
//! [
//!   {
//!     "title": "Installation",
//!     "slug": "installation",
//!     "route": "/6.0/installation",
//!     "content": "<h1>Installation</h1><p>...</p>",
//!     "front_matter": { "keywords": ["install", "setup"], "description": "..." },
//!     "children": []
//!   }
//! ]
//! ```

use super::{CorpusPage, CorpusProvider, PageNode, flatten};
use crate::error::CorpusError;
use std::path::PathBuf;

/// Reads rendered page trees exported by the documentation site.
#[derive(Debug, Clone)]
pub struct JsonCorpus {
    root: PathBuf,
}

impl JsonCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn version_path(&self, version: &str) -> PathBuf {
        self.root.join(format!("{}.json", version))
    }
}

impl CorpusProvider for JsonCorpus {
    fn flattened_pages(&self, version: &str) -> Result<Vec<CorpusPage>, CorpusError> {
        let path = self.version_path(version);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CorpusError::MissingVersion(version.to_string()));
            }
            Err(source) => return Err(CorpusError::Io { path, source }),
        };

        let roots: Vec<PageNode> =
            serde_json::from_str(&content).map_err(|source| CorpusError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Loaded page tree for {} from {}", version, path.display());
        Ok(flatten(roots, version))
    }
}
