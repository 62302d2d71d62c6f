pub mod cache;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod html;
pub mod schema;
pub mod search;
pub mod server;
pub mod service;
pub mod tools;
pub mod tracing;
pub mod types;
pub mod version;

pub use config::Config;
pub use error::{CacheError, CorpusError, SearchError};
pub use service::DocSearch;
pub use types::{IndexedPage, PageSize, Paginated, SearchQuery, SearchResponse, SearchResult};
