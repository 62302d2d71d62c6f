//! Index maintenance tool handlers.

use crate::service::DocSearch;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BuildIndexRequest {
    /// Version to rebuild (default: every configured version)
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClearIndexRequest {
    /// Version to evict (default: every configured version)
    #[serde(default)]
    pub version: Option<String>,
}

fn describe(version: Option<&str>) -> String {
    version.map_or_else(|| "all versions".to_string(), |v| format!("version {}", v))
}

/// Rebuild indexes on the blocking pool.
pub async fn handle_build_index(
    search: &Arc<DocSearch>,
    request: BuildIndexRequest,
) -> Result<String, String> {
    let search = Arc::clone(search);
    let version = request.version;
    let target = describe(version.as_deref());

    let count = tokio::task::spawn_blocking(move || search.build_index(version.as_deref()))
        .await
        .map_err(|e| format!("Index task failed: {}", e))?
        .map_err(|e| e.to_string())?;

    Ok(format!("Indexed {} pages for {}.", count, target))
}

/// Evict cached indexes.
pub async fn handle_clear_index(
    search: &Arc<DocSearch>,
    request: ClearIndexRequest,
) -> Result<String, String> {
    let search = Arc::clone(search);
    let version = request.version;
    let target = describe(version.as_deref());

    tokio::task::spawn_blocking(move || search.clear_index(version.as_deref()))
        .await
        .map_err(|e| format!("Clear task failed: {}", e))?
        .map_err(|e| e.to_string())?;

    Ok(format!("Cleared search index for {}.", target))
}
