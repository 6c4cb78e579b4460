//! Candidate score calculator
//!
//! Combines title similarity, token overlap, title-match bonuses, overview
//! match, popularity, rating and release-year proximity into one composite
//! relevance score per candidate.

use serde::Serialize;

use crate::models::MovieRecord;

use super::query::{ParsedQuery, normalize_text};
use super::scoring::ScoringConfig;
use super::similarity::{partial_ratio, ratio, token_set};

/// Per-signal view of a candidate's score.
///
/// Signals are reported unweighted except `vote_component` and the bonuses,
/// which are already in score units. `total` is the composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Best of `ratio(query, title)` and `ratio(query, original_title)`
    pub title_similarity: f64,
    /// Fraction of distinct query tokens found in the title
    pub token_overlap: f64,
    /// Exact / all-tokens / any-token bonus (mutually exclusive)
    pub tier_bonus: f64,
    /// Bonus for a title starting with the query
    pub prefix_bonus: f64,
    /// `partial_ratio(query, overview)`
    pub overview_partial: f64,
    /// `ln(1 + popularity) / 10`
    pub popularity_component: f64,
    /// `vote_average / 10 * vote_weight`
    pub vote_component: f64,
    /// Release-year proximity bonus
    pub year_component: f64,
    /// Composite score
    pub total: f64,
}

impl ScoreBreakdown {
    /// Tier bonus plus prefix bonus
    pub fn strong_title_bonus(&self) -> f64 {
        self.tier_bonus + self.prefix_bonus
    }
}

/// Calculator turning a candidate and a parsed query into a relevance score
///
/// Scoring is a pure function of the candidate, the query and the
/// configuration: identical inputs always produce a bit-identical score.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

impl ScoreCalculator {
    /// Create a new score calculator with the given configuration
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn new(config: ScoringConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("Invalid scoring config: {}", e);
        }
        Self { config }
    }

    /// Create a score calculator with the given configuration, returning an error if invalid
    pub fn try_new(config: ScoringConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Calculate the composite relevance score for a candidate
    ///
    /// Returns `0.0` for every candidate when the query has no core text
    /// (e.g. a query consisting only of a year).
    pub fn calculate_final_score(&self, movie: &MovieRecord, query: &ParsedQuery) -> f64 {
        self.breakdown(movie, query).total
    }

    /// Compute every signal for a candidate along with the composite score
    pub fn breakdown(&self, movie: &MovieRecord, query: &ParsedQuery) -> ScoreBreakdown {
        let core = query.core_text.trim();
        if core.is_empty() {
            return ScoreBreakdown::default();
        }

        let title = normalize_text(movie.display_title());
        let original_title = normalize_text(movie.original_title.as_deref().unwrap_or(""));

        let title_similarity = similarity_or_zero(core, &title)
            .max(similarity_or_zero(core, &original_title));

        let query_tokens = token_set(core);
        let title_tokens = token_set(&title);
        let shared = query_tokens.intersection(&title_tokens).count();

        let token_overlap = if query_tokens.is_empty() {
            0.0
        } else {
            shared as f64 / query_tokens.len() as f64
        };

        let tier_bonus = if title == core {
            self.config.exact_title_bonus
        } else if !query_tokens.is_empty() && shared == query_tokens.len() {
            self.config.all_tokens_bonus
        } else if shared > 0 {
            self.config.any_token_bonus
        } else {
            0.0
        };

        let prefix_bonus = if title.starts_with(core) {
            self.config.prefix_bonus
        } else {
            0.0
        };

        let overview = normalize_text(movie.overview.as_deref().unwrap_or(""));
        let overview_partial = if overview.is_empty() {
            0.0
        } else {
            partial_ratio(core, &overview)
        };

        let popularity_component = popularity_component(movie.popularity);
        let vote_component = self.vote_component(movie.vote_average);
        let year_component =
            self.year_component(query.extracted_year, movie.effective_release_year());

        let mut total = 0.0;
        total += title_similarity * self.config.title_similarity_weight;
        total += token_overlap * self.config.token_overlap_weight;
        total += tier_bonus + prefix_bonus;
        total += overview_partial * self.config.overview_weight;
        total += popularity_component * self.config.popularity_weight;
        total += vote_component;
        total += year_component;

        ScoreBreakdown {
            title_similarity,
            token_overlap,
            tier_bonus,
            prefix_bonus,
            overview_partial,
            popularity_component,
            vote_component,
            year_component,
            total,
        }
    }

    fn vote_component(&self, vote_average: Option<f64>) -> f64 {
        let vote_average = vote_average.filter(|v| v.is_finite()).unwrap_or(0.0);
        (vote_average / 10.0) * self.config.vote_weight
    }

    fn year_component(&self, query_year: Option<i32>, release_year: Option<i32>) -> f64 {
        let (Some(query_year), Some(release_year)) = (query_year, release_year) else {
            return 0.0;
        };

        match query_year.abs_diff(release_year) {
            0 => self.config.year_exact_bonus,
            1 => self.config.year_near_bonus,
            2 => self.config.year_far_bonus,
            _ => 0.0,
        }
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}

fn similarity_or_zero(query: &str, title: &str) -> f64 {
    if title.is_empty() { 0.0 } else { ratio(query, title) }
}

/// `ln(1 + popularity) / 10`; negative or non-finite popularity counts as zero.
pub fn popularity_component(popularity: Option<f64>) -> f64 {
    let popularity = popularity
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(0.0);
    popularity.ln_1p() / 10.0
}
