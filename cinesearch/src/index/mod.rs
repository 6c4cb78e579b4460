//! Candidate retrieval from an external full-text index
//!
//! The reranker only needs one capability from the index: "give me up to N
//! records matching this text, in your own relevance order, and tell me how
//! many matched overall". [`SearchIndex`] captures that capability; building,
//! populating and tuning the index itself happens elsewhere.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::models::MovieRecord;

pub mod meilisearch;
pub mod memory;

pub use self::meilisearch::MeilisearchIndex;
pub use self::memory::InMemoryIndex;

/// Error type for index operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The index could not be reached: connection failure, timeout or server-side error
    #[error("{0}")]
    Unavailable(String),

    /// The index rejected the query or returned a response that could not be decoded
    #[error("{0}")]
    Query(String),
}

/// Hits returned by one index query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexHits {
    /// Records in the index's own relevance order
    pub hits: Vec<MovieRecord>,

    /// The index's estimate of the total number of matches
    pub estimated_total: u64,
}

impl IndexHits {
    /// Hits with the total taken from the number of hits returned.
    pub fn from_hits(hits: Vec<MovieRecord>) -> Self {
        let estimated_total = hits.len() as u64;
        Self {
            hits,
            estimated_total,
        }
    }
}

/// Read-only search capability over movie records
///
/// Implementations are constructed once and shared across concurrent requests.
#[async_trait]
pub trait SearchIndex: Send + Sync + Debug {
    /// Return up to `limit` records matching `text`, best index match first.
    ///
    /// An empty result is not an error.
    async fn search(&self, text: &str, limit: usize) -> Result<IndexHits, IndexError>;

    /// Check that the index is reachable and serving
    async fn health(&self) -> Result<(), IndexError>;
}
