//! The reranking pipeline
//!
//! `raw query -> parse -> retrieve pool -> score -> rank -> assemble`
//!
//! Each call is independent. The only shared state is the read-only index
//! handle and the scoring configuration, both fixed at construction.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::index::{IndexHits, SearchIndex};
use crate::models::{MovieRecord, SearchResponse};
use crate::search::{ParsedQuery, ScoreCalculator, ScoredCandidate, ScoringConfig, parse_query, rank};
use crate::{CinesearchError, Result};

/// Smallest accepted result count
pub const MIN_LIMIT: usize = 1;

/// Largest accepted result count
pub const MAX_LIMIT: usize = 50;

/// Minimum number of candidates requested from the index
const MIN_POOL_SIZE: usize = 100;

/// Candidates over-fetched per requested result
const POOL_FACTOR: usize = 10;

/// Number of candidates requested from the index for a given result count:
/// `max(limit * 10, 100)`.
pub fn candidate_pool_size(limit: usize) -> usize {
    limit.saturating_mul(POOL_FACTOR).max(MIN_POOL_SIZE)
}

/// Reject limits outside `[MIN_LIMIT, MAX_LIMIT]`. Limits are never clamped.
pub fn validate_limit(limit: usize) -> Result<()> {
    if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(CinesearchError::InvalidLimit {
            limit,
            min: MIN_LIMIT,
            max: MAX_LIMIT,
        })
    }
}

/// Reranks index results with the composite relevance score.
#[derive(Debug, Clone)]
pub struct Reranker {
    index: Arc<dyn SearchIndex>,
    calculator: ScoreCalculator,
}

impl Reranker {
    /// Create a reranker over `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CinesearchError::Configuration`] when `scoring` is invalid.
    pub fn new(index: Arc<dyn SearchIndex>, scoring: ScoringConfig) -> Result<Self> {
        let calculator = ScoreCalculator::try_new(scoring)
            .map_err(|e| CinesearchError::Configuration(format!("Invalid scoring config: {}", e)))?;
        Ok(Self { index, calculator })
    }

    /// Search the index for `raw_query` and return the `limit` best results
    /// by composite score.
    ///
    /// The query and limit are validated before the index is contacted.
    ///
    /// # Errors
    ///
    /// - [`CinesearchError::InvalidLimit`] when `limit` is outside `[1, 50]`
    /// - [`CinesearchError::EmptyQuery`] when the query is blank
    /// - [`CinesearchError::IndexUnavailable`] / [`CinesearchError::IndexQueryError`]
    ///   when retrieval fails
    pub async fn rerank_search(&self, raw_query: &str, limit: usize) -> Result<SearchResponse> {
        validate_limit(limit)?;
        let query = parse_query(raw_query)?;
        let pool_size = candidate_pool_size(limit);

        debug!(
            query = %raw_query,
            core_text = %query.core_text,
            year = ?query.extracted_year,
            pool_size,
            "Parsed search query"
        );

        let IndexHits {
            hits,
            estimated_total,
        } = self.retrieve(&query, pool_size).await?;
        let retrieved = hits.len();

        let ranked = rank(self.score_off_runtime(hits, query).await?, limit);

        debug!(
            retrieved,
            estimated_total,
            returned = ranked.len(),
            top_score = ranked.first().map(|c| c.score),
            "Reranked candidate pool"
        );

        let records: Vec<MovieRecord> = ranked.into_iter().map(|c| c.record).collect();
        Ok(SearchResponse::assemble(raw_query, estimated_total, records))
    }

    /// Fetch the candidate pool for a parsed query.
    pub async fn retrieve(&self, query: &ParsedQuery, pool_size: usize) -> Result<IndexHits> {
        self.index
            .search(query.search_text(), pool_size)
            .await
            .map_err(|e| {
                warn!("Candidate retrieval failed: {}", e);
                CinesearchError::from(e)
            })
    }

    /// Score every candidate, preserving retrieval order.
    pub fn score(&self, hits: Vec<MovieRecord>, query: &ParsedQuery) -> Vec<ScoredCandidate> {
        hits.into_iter()
            .map(|record| {
                let score = self.calculator.calculate_final_score(&record, query);
                ScoredCandidate::new(record, score)
            })
            .collect()
    }

    /// Score the pool on the blocking thread pool so long queries do not stall
    /// the async workers.
    async fn score_off_runtime(
        &self,
        hits: Vec<MovieRecord>,
        query: ParsedQuery,
    ) -> Result<Vec<ScoredCandidate>> {
        let scorer = self.clone();
        tokio::task::spawn_blocking(move || scorer.score(hits, &query))
            .await
            .map_err(|e| CinesearchError::Other(format!("Scoring task failed: {}", e)))
    }

    /// Check that the underlying index is reachable
    pub async fn health(&self) -> Result<()> {
        self.index.health().await.map_err(CinesearchError::from)
    }

    /// The shared index handle
    pub fn index(&self) -> &Arc<dyn SearchIndex> {
        &self.index
    }

    /// The score calculator
    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }
}
