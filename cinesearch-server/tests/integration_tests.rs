use std::sync::Arc;

use axum_test::TestServer;
use cinesearch::config::SearchConfig;
use cinesearch::prelude::*;
use cinesearch_server::config::ServerConfig;
use cinesearch_server::{AppState, create_router};
use http::StatusCode;
use serde_json::Value;

fn catalog() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new(49026, "The Dark Knight Rises")
            .with_release_date("2012-07-16")
            .with_popularity(76.4)
            .with_votes(7.8, 22000),
        MovieRecord::new(155, "The Dark Knight")
            .with_overview("Batman raises the stakes in his war on crime.")
            .with_release_date("2008-07-16")
            .with_popularity(123.2)
            .with_votes(8.5, 32000)
            .with_poster_path("/qJ2tW6WMUDux911r6m7haRef0WH.jpg"),
        MovieRecord::new(27205, "Inception")
            .with_release_date("2010-07-15")
            .with_popularity(83.9),
    ]
}

fn test_server_with(index: InMemoryIndex, server_config: ServerConfig) -> TestServer {
    let reranker = Reranker::new(Arc::new(index), ScoringConfig::default())
        .expect("Failed to create reranker");
    let state = Arc::new(AppState::new(reranker, SearchConfig::default(), server_config));

    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Helper function to create a test server over the in-memory catalog
fn create_test_server() -> TestServer {
    test_server_with(InMemoryIndex::new(catalog()), ServerConfig::default())
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["meilisearch"], "ok");
}

#[tokio::test]
async fn test_health_check_degraded() {
    let index = InMemoryIndex::new(catalog())
        .with_failure(IndexError::Unavailable("connection refused".to_string()));
    let server = test_server_with(index, ServerConfig::default());

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(json["status"], "degraded");
    assert!(json["meilisearch"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_swagger_docs_available() {
    let server = create_test_server();

    let response = server.get("/docs/").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_openapi_spec_available() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["info"]["title"], "Cinesearch API");
    assert!(json["paths"]["/search"]["get"].is_object());
    assert!(json["paths"]["/health"]["get"].is_object());
}

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_reranks_results() {
        let server = create_test_server();

        let response = server.get("/search?q=the%20dark%20knight&limit=5").await;
        response.assert_status_ok();

        let json: Value = response.json();
        assert_eq!(json["query"], "the dark knight");
        assert_eq!(json["total_hits"], 2);

        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], 155);
        assert_eq!(results[0]["title"], "The Dark Knight");
        assert_eq!(results[0]["release_date"], "2008-07-16");
        assert_eq!(results[0]["poster_path"], "/qJ2tW6WMUDux911r6m7haRef0WH.jpg");
        assert!(results[0].get("score").is_none());
    }

    #[tokio::test]
    async fn test_search_year_preference() {
        let server = create_test_server();

        let response = server.get("/search?q=dark%20knight%202012").await;
        response.assert_status_ok();

        let json: Value = response.json();
        assert_eq!(json["query"], "dark knight 2012");
        assert_eq!(json["results"][0]["id"], 49026);
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let server = create_test_server();

        let response = server.get("/search?q=dark%20knight&limit=1").await;
        response.assert_status_ok();

        let json: Value = response.json();
        assert_eq!(json["results"].as_array().unwrap().len(), 1);
        assert_eq!(json["total_hits"], 2);
    }

    #[tokio::test]
    async fn test_search_no_matches() {
        let server = create_test_server();

        let response = server.get("/search?q=zzzz").await;
        response.assert_status_ok();

        let json: Value = response.json();
        assert_eq!(json["total_hits"], 0);
        assert!(json["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_and_blank_query_rejected() {
        let server = create_test_server();

        for url in ["/search", "/search?q=", "/search?q=%20%20"] {
            let response = server.get(url).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let json: Value = response.json();
            assert_eq!(json["error"], "empty_query", "{url}");
        }
    }

    #[tokio::test]
    async fn test_limit_out_of_range_rejected() {
        let server = create_test_server();

        for limit in [0, 51] {
            let response = server.get(&format!("/search?q=inception&limit={limit}")).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let json: Value = response.json();
            assert_eq!(json["error"], "invalid_limit");
            assert_eq!(json["details"]["limit"], limit);
            assert_eq!(json["details"]["max"], 50);
        }
    }

    #[tokio::test]
    async fn test_non_numeric_limit_rejected() {
        let server = create_test_server();

        let response = server.get("/search?q=inception&limit=ten").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json: Value = response.json();
        assert_eq!(json["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_index_unavailable_is_503() {
        let index = InMemoryIndex::new(catalog())
            .with_failure(IndexError::Unavailable("timed out".to_string()));
        let server = test_server_with(index, ServerConfig::default());

        let response = server.get("/search?q=inception").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let json: Value = response.json();
        assert_eq!(json["error"], "index_unavailable");
    }

    #[tokio::test]
    async fn test_index_query_error_is_502() {
        let index = InMemoryIndex::new(catalog())
            .with_failure(IndexError::Query("invalid_search_q".to_string()));
        let server = test_server_with(index, ServerConfig::default());

        let response = server.get("/search?q=inception").await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let json: Value = response.json();
        assert_eq!(json["error"], "index_query_error");
    }

    #[tokio::test]
    async fn test_validation_precedes_index_failure() {
        let index = InMemoryIndex::new(catalog())
            .with_failure(IndexError::Unavailable("timed out".to_string()));
        let server = test_server_with(index, ServerConfig::default());

        let response = server.get("/search?q=inception&limit=0").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod cors {
    use super::*;

    #[tokio::test]
    async fn test_any_origin_allowed_by_default() {
        let server = create_test_server();

        let response = server
            .get("/search?q=inception")
            .add_header("Origin", "https://www.themoviedb.org")
            .await;
        response.assert_status_ok();

        let allow_origin = response.headers().get("access-control-allow-origin");
        assert_eq!(allow_origin.unwrap(), "*");
    }

    #[tokio::test]
    async fn test_configured_origins_restrict_access() {
        let config = ServerConfig {
            cors_origins: vec!["https://www.themoviedb.org".to_string()],
            ..Default::default()
        };
        let server = test_server_with(InMemoryIndex::new(catalog()), config);

        let response = server
            .get("/search?q=inception")
            .add_header("Origin", "https://www.themoviedb.org")
            .await;
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://www.themoviedb.org"
        );

        let response = server
            .get("/search?q=inception")
            .add_header("Origin", "https://evil.example")
            .await;
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
