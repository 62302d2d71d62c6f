use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "docsearch",
    about = "Search versioned documentation, standalone or as an MCP server",
    version
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, env = "DOCSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the search tools over MCP on stdio (default)
    Serve,

    /// Build the search index
    Index {
        /// Only index this version
        #[arg(long = "version", value_name = "VERSION")]
        doc_version: Option<String>,

        /// Clear the cached index before rebuilding
        #[arg(long)]
        clear: bool,
    },

    /// Run a query and print the results
    Search {
        query: String,

        /// Version to search (default: latest)
        #[arg(long = "version", value_name = "VERSION")]
        doc_version: Option<String>,

        /// 1-based result page
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Results per page, or "all"
        #[arg(short, long)]
        size: Option<String>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Evict cached indexes
    Clear {
        /// Only clear this version
        #[arg(long = "version", value_name = "VERSION")]
        doc_version: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["docsearch"]);
        check!(cli.command.is_none());
    }

    #[test]
    fn test_index_flags() {
        let cli = Cli::parse_from(["docsearch", "index", "--version", "5.1", "--clear"]);
        let_assert!(Some(Commands::Index { doc_version, clear }) = cli.command);
        check!(doc_version.as_deref() == Some("5.1"));
        check!(clear);
    }

    #[test]
    fn test_search_args_and_global_config() {
        let cli = Cli::parse_from([
            "docsearch", "search", "pag*", "--size", "all", "--page", "2", "-c", "docs.toml",
        ]);
        check!(cli.config == Some(PathBuf::from("docs.toml")));
        let_assert!(Some(Commands::Search { query, size, page, .. }) = cli.command);
        check!(query == "pag*");
        check!(size.as_deref() == Some("all"));
        check!(page == 2);
    }
}
