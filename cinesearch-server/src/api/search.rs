//! Search and health endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, warn};

use crate::{
    api::dto::{HealthResponse, SearchParams, SearchResponseDto},
    error::{ServerResult, bad_request},
    state::AppState,
};

/// Search movies and rerank the candidates
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "Reranked results", body = SearchResponseDto),
        (status = 400, description = "Empty query or limit out of range", body = crate::error::ErrorResponse),
        (status = 502, description = "Search index rejected the query", body = crate::error::ErrorResponse),
        (status = 503, description = "Search index unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ServerResult<Json<SearchResponseDto>> {
    let Query(params) = params.map_err(|rejection| bad_request(&rejection.body_text()))?;

    let limit = params.limit.unwrap_or(state.search.default_limit);
    let query = params.q.unwrap_or_default();
    debug!(query = %query, limit, "Search request");

    let response = state.reranker.rerank_search(&query, limit).await?;

    Ok(Json(SearchResponseDto::from(response)))
}

/// Report search index connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Search index reachable", body = HealthResponse),
        (status = 503, description = "Search index unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.reranker.health().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::ok())),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::degraded(e.to_string())),
            )
        }
    }
}
