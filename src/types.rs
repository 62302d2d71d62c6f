//! Core data types shared by the indexer, search engine and paginator.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// One documentation page, pre-processed and ready to be searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedPage {
    pub title: String,
    /// Stable path identifier, unique within a version.
    pub slug: String,
    /// Resolved URL of the page.
    pub route: String,
    /// Plain-text body with all markup removed.
    pub content: String,
    pub version: String,
    /// Front-matter keywords joined with single spaces.
    pub keywords: String,
    /// Configured front-matter values joined with single spaces.
    pub metadata: String,
}

/// A page matching a query, with its weighted score and preview snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub slug: String,
    pub route: String,
    pub snippet: String,
    pub score: u32,
    pub version: String,
}

/// Number of rows per result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// Return every result without slicing.
    All,
    Fixed(NonZeroUsize),
}

impl PageSize {
    /// Build a fixed page size, rejecting zero.
    pub fn fixed(size: usize) -> Result<Self, SearchError> {
        NonZeroUsize::new(size)
            .map(Self::Fixed)
            .ok_or_else(|| SearchError::InvalidPagination("size must be at least 1".to_string()))
    }

    /// Clamp a fixed size to `max`; `All` is left untouched.
    pub fn clamp_to(self, max: NonZeroUsize) -> Self {
        match self {
            Self::Fixed(size) if size > max => Self::Fixed(max),
            other => other,
        }
    }

    /// The size reported back to callers: `0` stands for "all".
    pub const fn reported(self) -> usize {
        match self {
            Self::All => 0,
            Self::Fixed(size) => size.get(),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Fixed(size) => write!(f, "{}", size),
        }
    }
}

impl FromStr for PageSize {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let size: usize = s.parse().map_err(|_| {
            SearchError::InvalidPagination(format!(
                "size must be a positive integer or 'all', got '{}'",
                s
            ))
        })?;
        Self::fixed(size)
    }
}

/// Options for a single search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    /// Version to search; `None` selects the latest.
    pub version: Option<String>,
    /// 1-based page number.
    pub page: NonZeroUsize,
    /// Page size; `None` selects the configured default.
    pub size: Option<PageSize>,
}

impl SearchQuery {
    /// A query for the first page of the latest version with the default size.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            version: None,
            page: NonZeroUsize::MIN,
            size: None,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn page(mut self, page: NonZeroUsize) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: PageSize) -> Self {
        self.size = Some(size);
        self
    }
}

/// One page of rows plus the counts needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    pub rows: Vec<T>,
    /// Total items in the collection searched, before filtering.
    pub count: usize,
    /// Total items that matched, before slicing.
    pub count_filtered: usize,
    pub page: usize,
    /// Rows per page; `0` when every row was returned.
    pub size: usize,
}

/// The response returned by a documentation search.
pub type SearchResponse = Paginated<SearchResult>;
