//! Shared test fixtures for integration tests.
//!
//! Every fixture builds a fresh [`DocSearch`] over its own cache backend, so
//! tests never observe each other's indexes.
//!
//! # Available Fixtures
//!
//! - `three_pages`: the "First page" / "Second page" / "Third page" corpus
//!   on an in-memory cache
//! - `ranked_pages`: five pages that all match `route` with distinct scores
//! - [`FileBacked`]: the three-page corpus on a file cache in a temp directory

use docsearch_mcp::cache::{FileCache, MemoryCache};
use docsearch_mcp::config::Config;
use docsearch_mcp::corpus::{PageNode, StaticCorpus};
use docsearch_mcp::version::ConfiguredVersions;
use docsearch_mcp::{DocSearch, SearchQuery};
use rstest::fixture;
use serde_json::json;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tempfile::TempDir;

/// A search subsystem together with the corpus it reads, so tests can
/// change the documentation underneath it.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct Harness {
    pub search: DocSearch,
    pub corpus: Arc<StaticCorpus>,
}

/// Pages for version 6.0, each mentioning "page" in its body.
pub fn three_page_tree() -> Vec<PageNode> {
    vec![
        PageNode::new("First page", "first")
            .with_content("<p>The first page of the guide.</p>")
            .with_front_matter("keywords", json!(["intro"]))
            .with_child(
                PageNode::new("Second page", "first/second")
                    .with_content("<h2>Details</h2><p>Another page with details.</p>"),
            ),
        PageNode::new("Third page", "third")
            .with_content("<p>The last page.</p>")
            .with_front_matter("description", json!("Closing notes")),
    ]
}

/// Five pages matching `route` with distinct weighted scores.
///
/// Scores: Overview 1, Guide 2, Reference 3, Keywords 5, Route table 11.
pub fn ranked_tree() -> Vec<PageNode> {
    vec![
        PageNode::new("Overview", "overview").with_content("route"),
        PageNode::new("Guide", "guide").with_content("route route"),
        PageNode::new("Reference", "reference")
            .with_front_matter("description", json!("route"))
            .with_content("route"),
        PageNode::new("Keywords", "keywords").with_front_matter("keywords", json!(["route"])),
        PageNode::new("Route table", "route-table").with_content("route"),
    ]
}

pub fn config() -> Config {
    Config::from_toml(
        r#"
        [versions]
        latest = "6.0"
        available = ["6.0", "5.1"]
        "#,
    )
    .expect("Test configuration must parse")
}

fn corpus(tree: Vec<PageNode>) -> Arc<StaticCorpus> {
    Arc::new(
        StaticCorpus::new()
            .with_version("6.0", tree)
            .with_version(
                "5.1",
                vec![PageNode::new("Legacy page", "legacy").with_content("old page")],
            ),
    )
}

/// Build a harness over `tree` with the given configuration.
pub fn harness_with(tree: Vec<PageNode>, config: &Config) -> Harness {
    let corpus = corpus(tree);
    let registry = Arc::new(ConfiguredVersions::from_config(&config.versions));
    let store = Arc::new(MemoryCache::new(NonZeroUsize::new(8).expect("non-zero capacity")));
    Harness {
        search: DocSearch::new(config, corpus.clone(), registry, store),
        corpus,
    }
}

#[fixture]
pub fn three_pages() -> Harness {
    harness_with(three_page_tree(), &config())
}

#[fixture]
pub fn ranked_pages() -> Harness {
    harness_with(ranked_tree(), &config())
}

/// The three-page corpus over a [`FileCache`] rooted in a temp directory.
#[allow(dead_code)] // Used by the index tests only
pub struct FileBacked {
    pub dir: TempDir,
    pub corpus: Arc<StaticCorpus>,
    pub config: Config,
}

#[allow(dead_code)] // Used by the index tests only
impl FileBacked {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            corpus: corpus(three_page_tree()),
            config: config(),
        }
    }

    /// A fresh subsystem over the shared cache directory.
    pub fn search(&self) -> DocSearch {
        let registry = Arc::new(ConfiguredVersions::from_config(&self.config.versions));
        let store = Arc::new(FileCache::new(self.dir.path()));
        DocSearch::new(&self.config, self.corpus.clone(), registry, store)
    }
}

/// Titles of the rows returned for `query`.
#[allow(dead_code)] // Used across different integration test crates
pub fn titles(search: &DocSearch, query: &SearchQuery) -> Vec<String> {
    search
        .search(query)
        .expect("Search should succeed")
        .rows
        .into_iter()
        .map(|row| row.title)
        .collect()
}
