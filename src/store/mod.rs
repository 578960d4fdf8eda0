//! Document store abstraction.
//!
//! The fuzzy layer consumes exactly one external capability: a store that
//! can evaluate [`Predicate`] filters with projection, sort, and paging.
//! Everything else (scoring, ranking, suggestions) happens in memory on this
//! side of the boundary.

pub mod memory;
pub mod predicate;

use async_trait::async_trait;

use crate::document::CandidateRecord;
use crate::error::Result;

pub use memory::MemoryStore;
pub use predicate::{FindOptions, Predicate, SortDirection};

/// A pluggable document store capable of predicate-based retrieval.
///
/// Implementations must support disjunction/conjunction over arbitrary
/// fields, equality, and case-(in)sensitive substring matching. Failures
/// propagate unchanged; this layer performs no retries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch records matching `predicate`, honoring the find options.
    async fn find(
        &self,
        predicate: &Predicate,
        options: &FindOptions,
    ) -> Result<Vec<CandidateRecord>>;

    /// Count records matching `predicate`.
    async fn count_documents(&self, predicate: &Predicate) -> Result<u64>;
}
