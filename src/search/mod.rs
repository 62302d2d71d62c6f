//! Field-weighted documentation search.
//!
//! Pages are flattened and stripped into [`IndexedPage`](crate::types::IndexedPage)
//! records by the [`Indexer`], stored per version in the [`IndexCache`], and
//! scanned linearly by the [`SearchEngine`]. Ranked results are sliced into
//! pages by the [`Paginator`].

pub mod engine;
pub mod fields;
pub mod indexer;
pub(crate) mod matcher;
pub mod paginate;
pub mod snippet;
pub mod store;

pub use engine::{FieldMatches, SearchEngine};
pub use fields::FieldExtractor;
pub use indexer::Indexer;
pub use paginate::{ItemSource, Paginator, paginate};
pub use snippet::generate_snippet;
pub use store::IndexCache;
