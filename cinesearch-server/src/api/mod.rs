//! API implementation for the Cinesearch HTTP server

use std::sync::Arc;

use axum::{Router, routing::get};
use http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::ServerConfig, state::AppState};

pub mod dto;
pub mod search;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(search::search, search::health),
    components(
        schemas(
            dto::SearchResponseDto,
            dto::MovieResultDto,
            dto::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "search", description = "Reranked movie search"),
        (name = "health", description = "Service and search index health"),
    ),
    info(
        title = "Cinesearch API",
        version = "1.0.0",
        description = "Movie search with relevance reranking. Queries are answered by a Meilisearch index and the over-fetched candidates are reordered by title similarity, token overlap, popularity, rating and release year proximity.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    let api_router = Router::new()
        .route("/search", get(search::search))
        .route("/health", get(search::health))
        .with_state(state);

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().merge(api_router).merge(swagger_router).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}

/// CORS policy: any origin unless the server is configured with an origin list
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}
