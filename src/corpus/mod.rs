//! Sources of documentation pages.
//!
//! The search subsystem never renders pages itself. A [`CorpusProvider`]
//! hands it each version's pages as flat records in depth-first tree order.

mod json;
mod tree;

pub use json::JsonCorpus;
pub use tree::{PageNode, flatten};

use crate::error::CorpusError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Front matter of a page, as parsed by the renderer.
pub type FrontMatter = serde_json::Map<String, serde_json::Value>;

/// A single page as supplied by a corpus provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusPage {
    pub title: String,
    pub slug: String,
    pub route: String,
    /// Rendered body. May contain HTML.
    pub content: String,
    pub front_matter: FrontMatter,
    pub version: String,
}

/// Supplies the pages of a documentation version.
pub trait CorpusProvider: Send + Sync {
    /// All pages of `version`, flattened in deterministic depth-first order.
    fn flattened_pages(&self, version: &str) -> Result<Vec<CorpusPage>, CorpusError>;
}

/// An in-memory corpus of page trees keyed by version.
#[derive(Debug, Default)]
pub struct StaticCorpus {
    trees: RwLock<HashMap<String, Vec<PageNode>>>,
}

impl StaticCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version's page tree.
    pub fn with_version(self, version: impl Into<String>, roots: Vec<PageNode>) -> Self {
        self.replace(version, roots);
        self
    }

    /// Replace a version's page tree, e.g. after the documentation changed.
    pub fn replace(&self, version: impl Into<String>, roots: Vec<PageNode>) {
        self.trees
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(version.into(), roots);
    }
}

impl CorpusProvider for StaticCorpus {
    fn flattened_pages(&self, version: &str) -> Result<Vec<CorpusPage>, CorpusError> {
        let roots = self
            .trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(version)
            .cloned()
            .ok_or_else(|| CorpusError::MissingVersion(version.to_string()))?;

        Ok(flatten(roots, version))
    }
}
