//! Relevance scoring configuration
//!
//! The composite relevance score is a weighted sum of text, popularity, rating
//! and release-year signals. The weights live here so they can be loaded from
//! configuration; the defaults reproduce the reference ranking exactly.

use serde::{Deserialize, Serialize};

/// Weights and bonuses for the composite relevance score
///
/// The composite score of a candidate is:
///
/// ```text
/// title_similarity * title_similarity_weight
///   + token_overlap * token_overlap_weight
///   + tier bonus (exact / all tokens / any token) + prefix bonus
///   + overview_partial * overview_weight
///   + ln(1 + popularity) / 10 * popularity_weight
///   + vote_average / 10 * vote_weight
///   + year bonus (exact / one year off / two years off)
/// ```
///
/// # Example
///
/// ```
/// use cinesearch::search::scoring::ScoringConfig;
///
/// let config = ScoringConfig {
///     popularity_weight: 0.0,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Multiplier for the best title similarity ratio. Default: 1.5
    pub title_similarity_weight: f64,

    /// Multiplier for the query-token overlap fraction. Default: 0.8
    pub token_overlap_weight: f64,

    /// Bonus when the title equals the normalized query. Default: 2.0
    pub exact_title_bonus: f64,

    /// Bonus when every query token appears in the title. Default: 1.5
    pub all_tokens_bonus: f64,

    /// Bonus when at least one query token appears in the title. Default: 0.7
    pub any_token_bonus: f64,

    /// Additional bonus when the title starts with the query. Default: 0.5
    pub prefix_bonus: f64,

    /// Multiplier for the overview partial match. Default: 0.05
    pub overview_weight: f64,

    /// Multiplier for `ln(1 + popularity) / 10`. Default: 0.5
    pub popularity_weight: f64,

    /// Multiplier for `vote_average / 10`. Default: 0.3
    pub vote_weight: f64,

    /// Bonus when the release year equals the query year. Default: 0.3
    pub year_exact_bonus: f64,

    /// Bonus when the release year is one year off. Default: 0.15
    pub year_near_bonus: f64,

    /// Bonus when the release year is two years off. Default: 0.05
    pub year_far_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_similarity_weight: 1.5,
            token_overlap_weight: 0.8,
            exact_title_bonus: 2.0,
            all_tokens_bonus: 1.5,
            any_token_bonus: 0.7,
            prefix_bonus: 0.5,
            overview_weight: 0.05,
            popularity_weight: 0.5,
            vote_weight: 0.3,
            year_exact_bonus: 0.3,
            year_near_bonus: 0.15,
            year_far_bonus: 0.05,
        }
    }
}

impl ScoringConfig {
    /// Create a new scoring configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Scoring on text signals only: popularity, rating and year are ignored.
    ///
    /// Useful for catalogs without audience metadata.
    pub fn text_only() -> Self {
        Self {
            popularity_weight: 0.0,
            vote_weight: 0.0,
            year_exact_bonus: 0.0,
            year_near_bonus: 0.0,
            year_far_bonus: 0.0,
            ..Self::default()
        }
    }

    fn weights(&self) -> [(&'static str, f64); 12] {
        [
            ("title_similarity_weight", self.title_similarity_weight),
            ("token_overlap_weight", self.token_overlap_weight),
            ("exact_title_bonus", self.exact_title_bonus),
            ("all_tokens_bonus", self.all_tokens_bonus),
            ("any_token_bonus", self.any_token_bonus),
            ("prefix_bonus", self.prefix_bonus),
            ("overview_weight", self.overview_weight),
            ("popularity_weight", self.popularity_weight),
            ("vote_weight", self.vote_weight),
            ("year_exact_bonus", self.year_exact_bonus),
            ("year_near_bonus", self.year_near_bonus),
            ("year_far_bonus", self.year_far_bonus),
        ]
    }

    /// Validate the configuration
    ///
    /// Every weight and bonus must be finite and >= 0.0.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in self.weights() {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number", name));
            }
            if value < 0.0 {
                return Err(format!("{} must be >= 0.0", name));
            }
        }
        Ok(())
    }

    /// Check if any non-text signal contributes to the score
    pub fn has_metadata_signals(&self) -> bool {
        self.popularity_weight > 0.0
            || self.vote_weight > 0.0
            || self.year_exact_bonus > 0.0
            || self.year_near_bonus > 0.0
            || self.year_far_bonus > 0.0
    }
}
