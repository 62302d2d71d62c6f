//! Search tool handler.

use crate::service::DocSearch;
use crate::types::{PageSize, SearchQuery, SearchResponse};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;
use std::num::NonZeroUsize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query. `*` matches any run of characters, `?` exactly one.
    pub query: String,
    /// Documentation version to search (default: latest)
    #[serde(default)]
    pub version: Option<String>,
    /// 1-based result page (default: 1)
    #[serde(default)]
    pub page: Option<usize>,
    /// Results per page, or "all" (default: configured page size)
    #[serde(default)]
    pub size: Option<SizeArg>,
    /// Return the raw JSON response instead of formatted text
    #[serde(default)]
    pub json: bool,
}

/// A page size given either as a number or as the keyword `all`.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum SizeArg {
    Count(usize),
    Keyword(String),
}

impl SizeArg {
    fn to_page_size(&self) -> Result<PageSize, String> {
        let size = match self {
            Self::Count(size) => PageSize::fixed(*size),
            Self::Keyword(keyword) => keyword.parse(),
        };
        size.map_err(|e| e.to_string())
    }
}

impl SearchRequest {
    /// Convert tool arguments into a validated query.
    pub fn into_query(self) -> Result<SearchQuery, String> {
        let mut query = SearchQuery::new(self.query);
        if let Some(version) = self.version {
            query = query.version(version);
        }
        if let Some(page) = self.page {
            let page = NonZeroUsize::new(page)
                .ok_or("Invalid pagination: page must be at least 1")?;
            query = query.page(page);
        }
        if let Some(size) = &self.size {
            query = query.size(size.to_page_size()?);
        }
        Ok(query)
    }
}

/// Execute a search on the blocking pool.
pub async fn handle_search(
    search: &Arc<DocSearch>,
    request: SearchRequest,
) -> Result<String, String> {
    let json = request.json;
    let query = request.into_query()?;
    let search = Arc::clone(search);

    let response = tokio::task::spawn_blocking(move || search.search(&query))
        .await
        .map_err(|e| format!("Search task failed: {}", e))?
        .map_err(|e| e.to_string())?;

    if json {
        serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
    } else {
        Ok(format_response(&response))
    }
}

/// Render a result page as Markdown-ish text.
pub fn format_response(response: &SearchResponse) -> String {
    if response.rows.is_empty() {
        return format!("No results found ({} pages searched).", response.count);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Found {} matching pages out of {} (page {}):\n",
        response.count_filtered, response.count, response.page
    );

    for (i, result) in response.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. **{}** [{}] `{}` (score {})",
            i + 1,
            result.title,
            result.version,
            result.route,
            result.score
        );
        if !result.snippet.is_empty() {
            let _ = writeln!(out, "   {}", result.snippet);
        }
    }

    out
}
