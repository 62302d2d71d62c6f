use anyhow::Context;
use clap::Parser;
use docsearch_mcp::cli::{Cli, Commands};
use docsearch_mcp::config::Config;
use docsearch_mcp::server::SearchServer;
use docsearch_mcp::service::DocSearch;
use docsearch_mcp::tools::search::format_response;
use docsearch_mcp::types::{PageSize, SearchQuery};
use rmcp::{ServiceExt, transport::stdio};
use std::num::NonZeroUsize;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with MCP traffic on stdout
    docsearch_mcp::tracing::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let search = Arc::new(DocSearch::from_config(&config));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(search).await,
        Commands::Index { doc_version, clear } => {
            let version = doc_version.as_deref();
            if clear {
                search.clear_index(version)?;
            }
            let count = search.build_index(version)?;
            println!("Indexed {} pages", count);
            Ok(())
        }
        Commands::Search {
            query,
            doc_version,
            page,
            size,
            json,
        } => {
            let mut query = SearchQuery::new(query)
                .page(NonZeroUsize::new(page).context("--page must be at least 1")?);
            if let Some(version) = doc_version {
                query = query.version(version);
            }
            if let Some(size) = size {
                query = query.size(size.parse::<PageSize>()?);
            }

            let response = search.search(&query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", format_response(&response));
            }
            Ok(())
        }
        Commands::Clear { doc_version } => {
            search.clear_index(doc_version.as_deref())?;
            println!("Search index cleared");
            Ok(())
        }
    }
}

async fn serve(search: Arc<DocSearch>) -> anyhow::Result<()> {
    tracing::info!("Starting docsearch MCP server");

    let server = SearchServer::new(search);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}
