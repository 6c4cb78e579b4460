//! Meilisearch client contract tests
//!
//! Verify the HTTP request format sent to Meilisearch, response decoding, and
//! the mapping of transport and HTTP failures onto `IndexError`.

use cinesearch::config::IndexConfig;
use cinesearch::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> IndexConfig {
    IndexConfig {
        host: server.uri(),
        api_key: Some("master-key".to_string()),
        index_name: "movies".to_string(),
        timeout: Duration::from_secs(2),
    }
}

fn search_body() -> serde_json::Value {
    json!({
        "hits": [
            {"id": 27205, "title": "Inception", "release_date": "2010-07-15", "release_year": 2010,
             "popularity": 83.9, "vote_average": 8.4, "vote_count": 35000},
            {"id": 64956, "title": "Inception: The Cobol Job", "release_year": 2010}
        ],
        "query": "inception",
        "processingTimeMs": 1,
        "limit": 100,
        "offset": 0,
        "estimatedTotalHits": 2
    })
}

#[tokio::test]
async fn test_search_request_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/indexes/movies/search"))
        .and(header("authorization", "Bearer master-key"))
        .and(body_json(json!({"q": "inception", "limit": 100})))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    let hits = index.search("inception", 100).await.unwrap();

    assert_eq!(hits.hits.len(), 2);
    assert_eq!(hits.hits[0].id, 27205);
    assert_eq!(hits.hits[0].release_year, Some(2010));
    assert_eq!(hits.estimated_total, 2);
}

#[tokio::test]
async fn test_search_without_api_key_sends_no_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/indexes/movies/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = IndexConfig {
        api_key: None,
        ..config_for(&server)
    };
    let index = MeilisearchIndex::new(&config).unwrap();
    let hits = index.search("nothing", 100).await.unwrap();
    assert!(hits.hits.is_empty());
    assert_eq!(hits.estimated_total, 0);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    let err = index.search("heat", 100).await.unwrap_err();
    assert!(matches!(err, IndexError::Unavailable(ref msg) if msg.contains("503")));
}

#[tokio::test]
async fn test_client_error_is_query_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid value type for parameter `limit`",
            "code": "invalid_search_limit",
            "type": "invalid_request",
            "link": "https://docs.meilisearch.com/errors#invalid_search_limit"
        })))
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    let err = index.search("heat", 100).await.unwrap_err();
    match err {
        IndexError::Query(msg) => {
            assert!(msg.contains("400"));
            assert!(msg.contains("invalid_search_limit"));
        }
        other => panic!("expected query error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_index_is_query_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Index `movies` not found.",
            "code": "index_not_found"
        })))
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    assert!(matches!(
        index.search("heat", 100).await,
        Err(IndexError::Query(_))
    ));
}

#[tokio::test]
async fn test_undecodable_body_is_query_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    assert!(matches!(
        index.search("heat", 100).await,
        Err(IndexError::Query(_))
    ));
}

#[tokio::test]
async fn test_malformed_hits_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{"title": "No Id"}, {"id": 949, "title": "Heat"}],
            "estimatedTotalHits": 2
        })))
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    let hits = index.search("heat", 100).await.unwrap();
    assert_eq!(hits.hits.len(), 1);
    assert_eq!(hits.hits[0].id, 949);
    assert_eq!(hits.estimated_total, 2);
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = IndexConfig {
        timeout: Duration::from_millis(50),
        ..config_for(&server)
    };
    let index = MeilisearchIndex::new(&config).unwrap();
    assert!(matches!(
        index.search("inception", 100).await,
        Err(IndexError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let config = IndexConfig {
        host: "http://127.0.0.1:9".to_string(),
        api_key: None,
        index_name: "movies".to_string(),
        timeout: Duration::from_secs(2),
    };
    let index = MeilisearchIndex::new(&config).unwrap();

    assert!(matches!(
        index.search("inception", 100).await,
        Err(IndexError::Unavailable(_))
    ));
    assert!(matches!(index.health().await, Err(IndexError::Unavailable(_))));
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "available"})))
        .expect(1)
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    assert!(index.health().await.is_ok());
}

#[tokio::test]
async fn test_health_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    assert!(matches!(index.health().await, Err(IndexError::Unavailable(_))));
}

#[tokio::test]
async fn test_rerank_over_meilisearch() {
    let server = MockServer::start().await;

    // Index order puts the spin-off first; reranking must promote the exact title
    Mock::given(method("POST"))
        .and(path("/indexes/movies/search"))
        .and(body_json(json!({"q": "inception", "limit": 100})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [
                {"id": 64956, "title": "Inception: The Cobol Job", "release_year": 2010, "popularity": 4.1},
                {"id": 27205, "title": "Inception", "release_year": 2010, "popularity": 83.9}
            ],
            "estimatedTotalHits": 57
        })))
        .expect(1)
        .mount(&server)
        .await;

    let index = MeilisearchIndex::new(&config_for(&server)).unwrap();
    let reranker = Reranker::new(Arc::new(index), ScoringConfig::default()).unwrap();

    let response = reranker.rerank_search("Inception 2010", 10).await.unwrap();
    assert_eq!(response.query, "Inception 2010");
    assert_eq!(response.total_hits, 57);
    assert_eq!(response.results[0].id, 27205);
    assert_eq!(response.results[1].id, 64956);
}
