//! The search subsystem's public entry points.

use crate::cache::{self, CacheStore};
use crate::config::Config;
use crate::corpus::{CorpusProvider, JsonCorpus};
use crate::error::SearchError;
use crate::search::{IndexCache, Indexer, SearchEngine, paginate};
use crate::types::{PageSize, SearchQuery, SearchResponse};
use crate::version::{ConfiguredVersions, VersionRegistry};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

/// Search, index and invalidate documentation indexes.
///
/// Shared across threads behind an `Arc`. All state lives in the injected
/// cache backend, so independent instances over the same backend agree.
#[derive(Debug)]
pub struct DocSearch {
    indexer: Indexer,
    cache: IndexCache,
    engine: SearchEngine,
    default_size: PageSize,
    max_size: NonZeroUsize,
}

impl DocSearch {
    /// Assemble the subsystem from explicit collaborators.
    pub fn new(
        config: &Config,
        corpus: Arc<dyn CorpusProvider>,
        registry: Arc<dyn VersionRegistry>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        let search = &config.search;
        let max_size = NonZeroUsize::new(search.max_size).unwrap_or(NonZeroUsize::MIN);
        let default_size = NonZeroUsize::new(search.default_size).unwrap_or(NonZeroUsize::MIN);

        Self {
            indexer: Indexer::from_config(corpus, registry, search),
            cache: IndexCache::new(store, config.cache.clone(), search.index.clone()),
            engine: SearchEngine::from_config(search),
            default_size: PageSize::Fixed(default_size),
            max_size,
        }
    }

    /// Assemble the subsystem from configuration alone: JSON corpus,
    /// configured versions and the configured cache driver.
    pub fn from_config(config: &Config) -> Self {
        let corpus = Arc::new(JsonCorpus::new(config.corpus.directory()));
        let registry = Arc::new(ConfiguredVersions::from_config(&config.versions));
        let store = cache::from_config(&config.cache);
        Self::new(config, corpus, registry, store)
    }

    pub fn registry(&self) -> &Arc<dyn VersionRegistry> {
        self.indexer.registry()
    }

    /// Run a query and return one page of ranked results.
    ///
    /// Short queries are rejected before any index is loaded or built.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let start = Instant::now();
        let text = self.engine.validate(&query.query)?;
        let version = self.registry().resolve(query.version.as_deref())?;

        let index = self.cache.get(&version, &self.indexer)?;
        let results = self.engine.perform_search(text, &index)?;

        let size = query
            .size
            .map_or(self.default_size, |size| size.clamp_to(self.max_size));
        let response = paginate(&results, query.page, size, index.len());

        tracing::info!(
            "Search '{}' in {}: {} of {} pages matched, page {} ({} rows) in {:?}",
            text,
            version,
            response.count_filtered,
            response.count,
            response.page,
            response.rows.len(),
            start.elapsed()
        );
        Ok(response)
    }

    /// Rebuild the index of one version, or of every version when `None`.
    ///
    /// Returns the number of pages indexed.
    pub fn build_index(&self, version: Option<&str>) -> Result<usize, SearchError> {
        self.indexer.build_index(version, &self.cache)
    }

    /// Evict the cached index of one version, or of every version when
    /// `None`. The next search of an evicted version rebuilds it.
    pub fn clear_index(&self, version: Option<&str>) -> Result<(), SearchError> {
        let versions = match version {
            Some(version) => vec![self.registry().resolve(Some(version))?],
            None => self.registry().versions(),
        };

        self.cache.clear(versions.iter().map(String::as_str));
        Ok(())
    }

    /// Whether a live index for `version` is cached.
    pub fn is_indexed(&self, version: &str) -> bool {
        self.cache.is_cached(version)
    }
}
