//! Integration tests for the Cinesearch CLI
//!
//! Commands run against fixture files written to a temporary directory, so no
//! Meilisearch instance is needed.

use std::fs;
use std::path::PathBuf;

use cinesearch::config::CinesearchConfig;
use cinesearch::prelude::*;
use cinesearch_cli::args::SearchArgs;
use cinesearch_cli::handlers::run_search;
use cinesearch_cli::{CinesearchCliContext, render_config, render_search_results};
use tempfile::TempDir;

const FIXTURE: &str = r#"[
    {"id": 49026, "title": "The Dark Knight Rises", "release_date": "2012-07-16",
     "popularity": 76.4, "vote_average": 7.8, "vote_count": 22000},
    {"id": 155, "title": "The Dark Knight", "release_date": "2008-07-16",
     "popularity": 123.2, "vote_average": 8.5, "vote_count": 32000},
    {"id": 129, "title": "Spirited Away", "original_title": "千と千尋の神隠し",
     "release_date": "2001-07-20", "popularity": 98.1, "vote_average": 8.5, "vote_count": 16000},
    {"id": 27205, "title": "Inception", "overview": null, "release_date": "2010-07-15"}
]"#;

/// Helper to write a fixture file into an isolated directory
fn write_fixture(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("movies.json");
    fs::write(&path, contents).expect("Failed to write fixture");
    (temp_dir, path)
}

fn create_test_context() -> (CinesearchCliContext, TempDir) {
    let (temp_dir, path) = write_fixture(FIXTURE);
    let context = CinesearchCliContext::with_config(CinesearchConfig::default(), Some(&path))
        .expect("Failed to build CLI context");
    (context, temp_dir)
}

fn search_args(query: &str, limit: Option<usize>) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        limit,
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_fixture() {
        let (ctx, _temp_dir) = create_test_context();
        assert!(ctx.offline);

        let response = run_search(&ctx, &search_args("the dark knight", None))
            .await
            .unwrap();

        assert_eq!(response.query, "the dark knight");
        assert_eq!(response.total_hits, 2);
        assert_eq!(response.results[0].id, 155);
    }

    #[tokio::test]
    async fn test_search_year_hint() {
        let (ctx, _temp_dir) = create_test_context();

        let response = run_search(&ctx, &search_args("dark knight 2012", Some(1)))
            .await
            .unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, 49026);
    }

    #[tokio::test]
    async fn test_search_original_title() {
        let (ctx, _temp_dir) = create_test_context();

        let response = run_search(&ctx, &search_args("千と千尋の神隠し", None))
            .await
            .unwrap();

        assert_eq!(response.results[0].id, 129);
        assert_eq!(response.results[0].title, "Spirited Away");
    }

    #[tokio::test]
    async fn test_default_limit_from_config() {
        let (_temp_dir, path) = write_fixture(FIXTURE);
        let mut config = CinesearchConfig::default();
        config.search.default_limit = 1;
        let ctx = CinesearchCliContext::with_config(config, Some(&path)).unwrap();

        let response = run_search(&ctx, &search_args("knight", None)).await.unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.total_hits, 2);
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let (ctx, _temp_dir) = create_test_context();

        let err = run_search(&ctx, &search_args("  ", None)).await.unwrap_err();
        assert!(matches!(err, CinesearchError::EmptyQuery));

        let err = run_search(&ctx, &search_args("inception", Some(51)))
            .await
            .unwrap_err();
        assert!(matches!(err, CinesearchError::InvalidLimit { limit: 51, .. }));
    }

    #[tokio::test]
    async fn test_health_on_fixture() {
        let (ctx, _temp_dir) = create_test_context();
        assert!(ctx.reranker.health().await.is_ok());
    }
}

mod fixtures {
    use super::*;

    #[test]
    fn test_missing_fixture_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let result = CinesearchCliContext::with_config(CinesearchConfig::default(), Some(&path));
        assert!(matches!(result, Err(CinesearchError::Configuration(_))));
    }

    #[test]
    fn test_malformed_fixture_is_configuration_error() {
        let (_temp_dir, path) = write_fixture(r#"{"id": 1}"#);

        let result = CinesearchCliContext::with_config(CinesearchConfig::default(), Some(&path));
        assert!(matches!(result, Err(CinesearchError::Configuration(_))));
    }

    #[test]
    fn test_context_without_fixture_uses_meilisearch() {
        let ctx = CinesearchCliContext::with_config(CinesearchConfig::default(), None).unwrap();
        assert!(!ctx.offline);
    }
}

mod config_file {
    use super::*;

    #[test]
    fn test_load_explicit_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cinesearch.toml");
        fs::write(
            &path,
            r#"
[index]
host = "http://search.internal:7700"
index_name = "films"
timeout = "3s"

[search]
default_limit = 5

[scoring]
popularity_weight = 0.25
"#,
        )
        .unwrap();

        let config = CinesearchCliContext::load_config(Some(&path)).unwrap();
        assert_eq!(config.index.index_name, "films");
        assert_eq!(config.index.timeout, std::time::Duration::from_secs(3));
        assert_eq!(config.search.default_limit, 5);
        assert_eq!(config.scoring.popularity_weight, 0.25);
        assert_eq!(config.scoring.vote_weight, ScoringConfig::default().vote_weight);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");

        assert!(matches!(
            CinesearchCliContext::load_config(Some(&path)),
            Err(CinesearchError::Configuration(_))
        ));
    }
}

mod output {
    use super::*;

    #[tokio::test]
    async fn test_render_search_results() {
        let (ctx, _temp_dir) = create_test_context();
        let response = run_search(&ctx, &search_args("the dark knight", None))
            .await
            .unwrap();

        let table = render_search_results(&response);
        assert!(table.contains("The Dark Knight"));
        assert!(table.contains("The Dark Knight Rises"));
        assert!(table.contains("2008-07-16"));
        assert!(table.contains("8.5"));
    }

    #[test]
    fn test_render_empty_results() {
        let response = SearchResponse {
            query: "zzzz".to_string(),
            total_hits: 0,
            results: vec![],
        };

        assert!(render_search_results(&response).contains("No movies found"));
    }

    #[test]
    fn test_render_config() {
        let rendered = render_config(&CinesearchConfig::default());

        assert!(rendered.contains("http://127.0.0.1:7700"));
        assert!(rendered.contains("movies"));
        assert!(rendered.contains("title_similarity_weight"));
        assert!(rendered.contains("(none)"));
    }
}
