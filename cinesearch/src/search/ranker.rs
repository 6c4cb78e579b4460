//! Ordering of scored candidates.

use crate::models::MovieRecord;

/// A candidate paired with its composite score. Never leaves the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub record: MovieRecord,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn new(record: MovieRecord, score: f64) -> Self {
        Self { record, score }
    }
}

/// Order candidates by score, best first, and keep at most `limit`.
///
/// The sort is stable: candidates with equal scores keep the order in which
/// the index returned them.
pub fn rank(mut candidates: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(limit);
    candidates
}
