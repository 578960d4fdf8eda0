//! # Timkiem
//!
//! A fuzzy ("approximate") text-search layer that sits in front of a generic
//! document store with no native fuzzy-matching capability.
//!
//! ## Features
//!
//! - Vietnamese diacritic folding and case folding for comparison
//! - Levenshtein edit distance and similarity scoring
//! - Store-side coarse filtering via substring/equality predicates
//! - In-memory re-ranking with configurable fuzzy levels
//! - Search suggestions derived from candidate batches
//! - Paginated search with concurrent find/count
//!
//! ## Architecture
//!
//! Retrieval runs in two stages: the [`query`] module translates a search
//! term into a broad disjunctive [`store::Predicate`] the store can execute
//! natively, then the [`rank`] module recomputes a true fuzzy score for each
//! fetched candidate and filters by the selected [`level::FuzzyLevel`]
//! threshold. The predicate is deliberately a superset filter; precision
//! comes from the rerank pass.

pub mod distance;
pub mod document;
pub mod error;
pub mod level;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod search;
pub mod store;
pub mod suggest;

pub mod prelude {
    //! Convenient re-exports of the most commonly used types.

    pub use crate::document::{CandidateRecord, FieldValue};
    pub use crate::error::{Result, TimkiemError};
    pub use crate::level::FuzzyLevel;
    pub use crate::query::QueryOptions;
    pub use crate::rank::ScoredResult;
    pub use crate::search::{FuzzySearcher, PageItem, PageRequest, PaginatedResult, SearchOptions};
    pub use crate::store::{DocumentStore, FindOptions, MemoryStore, Predicate, SortDirection};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
