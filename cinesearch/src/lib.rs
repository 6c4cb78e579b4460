//! # Cinesearch
//!
//! Relevance reranking for movie search. A free-text query (optionally carrying
//! a release year, e.g. `"inception 2010"`) is sent to an external full-text
//! index for an over-fetched candidate pool, and the pool is then re-scored with
//! a multi-signal relevance function and truncated to the requested size.
//!
//! ## Quick Start
//!
//! ```rust
//! use cinesearch::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let index = InMemoryIndex::new(vec![
//!     MovieRecord::new(27205, "Inception").with_release_date("2010-07-15"),
//!     MovieRecord::new(1124, "The Prestige").with_release_date("2006-10-17"),
//! ]);
//!
//! let reranker = Reranker::new(Arc::new(index), ScoringConfig::default())?;
//! let response = reranker.rerank_search("inception 2010", 5).await?;
//!
//! assert_eq!(response.results[0].title, "Inception");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Query parsing**: year extraction and text normalization ([`search::query`])
//! - **Retrieval**: the [`index::SearchIndex`] capability, backed by Meilisearch
//!   in production and by [`index::InMemoryIndex`] in tests
//! - **Scoring**: string similarity, token overlap, popularity, rating and year
//!   proximity fused by [`search::ScoreCalculator`]
//! - **Ranking**: stable ordering by score ([`search::ranker`])
//!
//! The HTTP boundary lives in the separate `cinesearch-server` crate.

pub mod config;
pub mod core;
pub mod index;
pub mod logging;
pub mod models;
pub mod search;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::{init, init_with_defaults};

    pub use crate::config::{
        CinesearchConfig, ConfigBuilder, ConfigLoader, IndexConfig, LogFormat, LogLevel,
        LoggingConfig, SearchConfig,
    };

    pub use crate::core::{MAX_LIMIT, MIN_LIMIT, Reranker, candidate_pool_size};

    pub use crate::index::{InMemoryIndex, IndexError, IndexHits, MeilisearchIndex, SearchIndex};

    pub use crate::models::{MovieRecord, MovieResult, SearchResponse};

    pub use crate::search::{ParsedQuery, ScoreBreakdown, ScoreCalculator, ScoringConfig};

    pub use crate::{CinesearchError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Cinesearch operations
#[derive(Debug, thiserror::Error)]
pub enum CinesearchError {
    /// The query was empty after trimming
    #[error("Search query cannot be empty. Provide a title, optionally followed by a year like 'inception 2010'")]
    EmptyQuery,

    /// The requested result count is outside the accepted range
    #[error("Invalid limit {limit}: must be between {min} and {max}")]
    InvalidLimit { limit: usize, min: usize, max: usize },

    /// The search index could not be reached (connection failure, timeout, server error)
    #[error("Search index unavailable: {0}. Check that the index is running and reachable")]
    IndexUnavailable(String),

    /// The search index rejected the query or returned an unusable response
    #[error("Search index rejected the query: {0}")]
    IndexQueryError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl CinesearchError {
    /// Whether the failure is transient and the request may succeed if retried.
    ///
    /// Retrying is the caller's decision; the pipeline itself never retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, CinesearchError::IndexUnavailable(_))
    }
}

impl From<crate::config::ConfigError> for CinesearchError {
    fn from(err: crate::config::ConfigError) -> Self {
        CinesearchError::Configuration(err.to_string())
    }
}

impl From<crate::index::IndexError> for CinesearchError {
    fn from(err: crate::index::IndexError) -> Self {
        match err {
            crate::index::IndexError::Unavailable(msg) => CinesearchError::IndexUnavailable(msg),
            crate::index::IndexError::Query(msg) => CinesearchError::IndexQueryError(msg),
        }
    }
}

/// Result type for Cinesearch operations
pub type Result<T> = std::result::Result<T, CinesearchError>;

/// Initialize Cinesearch with configuration discovered from the default
/// locations (config files, `CINESEARCH_*` and `MEILI_*` environment variables,
/// including those kept in a `.env` file).
///
/// # Examples
///
/// ```no_run
/// use cinesearch::prelude::*;
///
/// async fn example() -> Result<()> {
///     let reranker = init_with_defaults()?;
///     let response = reranker.rerank_search("the matrix", 10).await?;
///     println!("{} candidates matched", response.total_hits);
///     Ok(())
/// }
/// ```
pub fn init_with_defaults() -> Result<core::Reranker> {
    config::load_dotenv()?;
    let config = config::ConfigLoader::new()
        .load_default_files()
        .load_env()
        .load_meili_env()
        .extract()?;
    init(config)
}

/// Initialize Cinesearch with the provided configuration
///
/// Sets up logging and builds a [`core::Reranker`] backed by a
/// [`index::MeilisearchIndex`] pointing at `config.index`. The index client is
/// constructed once here and shared read-only afterwards.
///
/// # Examples
///
/// ```no_run
/// use cinesearch::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = ConfigBuilder::new()
///         .with_index_host("http://127.0.0.1:7700")
///         .with_index_name("movies")
///         .build()?;
///
///     let reranker = init(config)?;
///     Ok(())
/// }
/// ```
pub fn init(config: config::CinesearchConfig) -> Result<core::Reranker> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    let index = index::MeilisearchIndex::new(&config.index)?;
    tracing::info!(
        host = %config.index.host,
        index = %config.index.index_name,
        "Search index client initialized"
    );

    core::Reranker::new(std::sync::Arc::new(index), config.scoring)
}
