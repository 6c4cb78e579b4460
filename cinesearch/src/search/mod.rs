//! Query parsing, relevance scoring and ranking
//!
//! This module holds the pure, I/O-free part of the reranking pipeline:
//!
//! - [`query`]: year extraction and normalization of the raw query
//! - [`similarity`]: the versioned `ratio` / `partial_ratio` string metrics
//! - [`scoring`]: weights of the composite relevance score
//! - [`calculator`]: per-candidate scoring
//! - [`ranker`]: stable ordering and truncation
//!
//! # Example
//!
//! ```
//! use cinesearch::models::MovieRecord;
//! use cinesearch::search::{ScoreCalculator, ScoringConfig, parse_query};
//!
//! let calculator = ScoreCalculator::new(ScoringConfig::default());
//! let query = parse_query("inception 2010").unwrap();
//!
//! let inception = MovieRecord::new(27205, "Inception").with_release_year(2010);
//! let interstellar = MovieRecord::new(157336, "Interstellar").with_release_year(2014);
//!
//! assert!(
//!     calculator.calculate_final_score(&inception, &query)
//!         > calculator.calculate_final_score(&interstellar, &query)
//! );
//! ```

pub mod calculator;
pub mod query;
pub mod ranker;
pub mod scoring;
pub mod similarity;

pub use calculator::{ScoreBreakdown, ScoreCalculator};
pub use query::{ParsedQuery, normalize_text, parse_query};
pub use ranker::{ScoredCandidate, rank};
pub use scoring::ScoringConfig;
pub use similarity::SIMILARITY_VERSION;
