//! Builds per-version search indexes from the documentation corpus.

use super::fields::FieldExtractor;
use super::store::IndexCache;
use crate::config::SearchConfig;
use crate::corpus::{CorpusPage, CorpusProvider};
use crate::error::SearchError;
use crate::html::strip_markup;
use crate::types::IndexedPage;
use crate::version::VersionRegistry;
use std::sync::Arc;
use std::time::Instant;

/// Turns corpus pages into [`IndexedPage`] records.
pub struct Indexer {
    corpus: Arc<dyn CorpusProvider>,
    registry: Arc<dyn VersionRegistry>,
    extractor: FieldExtractor,
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("versions", &self.registry.versions())
            .field("metadata_fields", &self.extractor.metadata_fields())
            .finish_non_exhaustive()
    }
}

impl Indexer {
    pub fn new(
        corpus: Arc<dyn CorpusProvider>,
        registry: Arc<dyn VersionRegistry>,
        extractor: FieldExtractor,
    ) -> Self {
        Self {
            corpus,
            registry,
            extractor,
        }
    }

    pub fn from_config(
        corpus: Arc<dyn CorpusProvider>,
        registry: Arc<dyn VersionRegistry>,
        config: &SearchConfig,
    ) -> Self {
        Self::new(corpus, registry, FieldExtractor::new(&config.metadata_fields))
    }

    pub fn registry(&self) -> &Arc<dyn VersionRegistry> {
        &self.registry
    }

    /// Build and cache the index of one version, or of every configured
    /// version when `version` is `None`.
    ///
    /// Returns the total number of pages indexed.
    pub fn build_index(
        &self,
        version: Option<&str>,
        cache: &IndexCache,
    ) -> Result<usize, SearchError> {
        let versions = match version {
            Some(version) => vec![self.registry.resolve(Some(version))?],
            None => self.registry.versions(),
        };

        let mut total = 0;
        for version in &versions {
            let pages = self.index_version(version)?;
            total += pages.len();
            cache.put(version, &pages);
        }

        tracing::info!("Indexed {} pages across {} version(s)", total, versions.len());
        Ok(total)
    }

    /// Index every page of a single, already resolved version.
    pub fn index_version(&self, version: &str) -> Result<Vec<IndexedPage>, SearchError> {
        let start = Instant::now();
        let pages = self.corpus.flattened_pages(version)?;

        let indexed: Vec<IndexedPage> = pages.iter().map(|page| self.index_page(page)).collect();

        tracing::info!(
            "Built search index for {} ({} pages) in {:?}",
            version,
            indexed.len(),
            start.elapsed()
        );
        Ok(indexed)
    }

    fn index_page(&self, page: &CorpusPage) -> IndexedPage {
        IndexedPage {
            title: page.title.clone(),
            slug: page.slug.clone(),
            route: page.route.clone(),
            content: strip_markup(&page.content),
            version: page.version.clone(),
            keywords: self.extractor.keywords(&page.front_matter),
            metadata: self.extractor.metadata(&page.front_matter),
        }
    }
}
