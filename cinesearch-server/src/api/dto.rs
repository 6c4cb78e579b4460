//! Data Transfer Objects for the API

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use cinesearch::models::{MovieResult, SearchResponse};

/// Query string of `GET /search`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text query, optionally ending in a release year
    #[param(example = "inception 2010")]
    pub q: Option<String>,

    /// Number of results to return (1-50); the configured default when omitted
    #[param(minimum = 1, maximum = 50, example = 10)]
    pub limit: Option<usize>,
}

/// A ranked movie
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieResultDto {
    /// Movie identifier
    pub id: i64,

    /// Display title (falls back to the original title)
    pub title: String,

    pub overview: Option<String>,

    /// Release date as `YYYY-MM-DD`
    pub release_date: Option<String>,

    pub popularity: Option<f64>,

    pub vote_average: Option<f64>,

    pub vote_count: Option<i64>,

    pub poster_path: Option<String>,
}

impl From<MovieResult> for MovieResultDto {
    fn from(result: MovieResult) -> Self {
        Self {
            id: result.id,
            title: result.title,
            overview: result.overview,
            release_date: result.release_date,
            popularity: result.popularity,
            vote_average: result.vote_average,
            vote_count: result.vote_count,
            poster_path: result.poster_path,
        }
    }
}

/// Reranked search results
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponseDto {
    /// The query exactly as submitted
    pub query: String,

    /// Number of index matches before reranking and truncation
    pub total_hits: u64,

    /// Results, best first
    pub results: Vec<MovieResultDto>,
}

impl From<SearchResponse> for SearchResponseDto {
    fn from(response: SearchResponse) -> Self {
        Self {
            query: response.query,
            total_hits: response.total_hits,
            results: response.results.into_iter().map(MovieResultDto::from).collect(),
        }
    }
}

/// Service health
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the search index is reachable, `degraded` otherwise
    #[schema(example = "ok")]
    pub status: String,

    /// `ok`, or the error returned by the index
    #[schema(example = "ok")]
    pub meilisearch: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            meilisearch: "ok".to_string(),
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            status: "degraded".to_string(),
            meilisearch: reason.into(),
        }
    }
}
