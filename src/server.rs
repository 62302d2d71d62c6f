//! MCP server exposing documentation search as tools.

use crate::schema::inline_schema_for_type;
use crate::service::DocSearch;
use crate::tools::index::{
    BuildIndexRequest, ClearIndexRequest, handle_build_index, handle_clear_index,
};
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for documentation search
#[derive(Clone)]
pub struct SearchServer {
    /// Shared search subsystem
    search: Arc<DocSearch>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SearchServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchServer")
            .field("search", &self.search)
            .finish()
    }
}

#[tool_router]
impl SearchServer {
    pub fn new(search: Arc<DocSearch>) -> Self {
        Self {
            search,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the documentation of a version. Matches titles, keywords, metadata and page content case-insensitively; `*` and `?` act as wildcards within a word. Results are ranked by a weighted score (title 10, keywords 5, metadata 2, content 1) and paginated.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.search, request).await
    }

    #[tool(
        description = "Rebuild the search index for one documentation version, or for every configured version when none is given. Returns the number of pages indexed.",
        input_schema = inline_schema_for_type::<BuildIndexRequest>()
    )]
    async fn build_index(
        &self,
        Parameters(request): Parameters<BuildIndexRequest>,
    ) -> std::result::Result<String, String> {
        handle_build_index(&self.search, request).await
    }

    #[tool(
        description = "Evict the cached search index for one documentation version, or for every configured version when none is given. The next search rebuilds it.",
        input_schema = inline_schema_for_type::<ClearIndexRequest>()
    )]
    async fn clear_index(
        &self,
        Parameters(request): Parameters<ClearIndexRequest>,
    ) -> std::result::Result<String, String> {
        handle_clear_index(&self.search, request).await
    }
}

#[tool_handler]
impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .build(),
        )
        .with_protocol_version(ProtocolVersion::V_2024_11_05)
        .with_server_info(Implementation::from_build_env())
        .with_instructions(
            "docsearch-mcp: Field-weighted search over versioned documentation. \
             Use search with a query of at least the configured minimum length (3 by default); \
             indexes are built on demand and can be refreshed with build_index or evicted with clear_index."
                .to_string(),
        )
    }
}
