//! Meilisearch-backed [`SearchIndex`]

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::IndexConfig;
use crate::models::MovieRecord;
use crate::{CinesearchError, Result};

use super::{IndexError, IndexHits, SearchIndex};

/// Search response envelope. Hits are kept raw so that one malformed document
/// does not fail the whole query.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    hits: Vec<Value>,
    #[serde(rename = "estimatedTotalHits")]
    estimated_total_hits: Option<u64>,
    #[serde(rename = "totalHits")]
    total_hits: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
    code: Option<String>,
}

/// Client for a single Meilisearch index
#[derive(Clone)]
pub struct MeilisearchIndex {
    client: reqwest::Client,
    host: String,
    index_name: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for MeilisearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeilisearchIndex")
            .field("host", &self.host)
            .field("index_name", &self.index_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MeilisearchIndex {
    /// Build a client from the index configuration.
    ///
    /// No request is made here; use [`SearchIndex::health`] to check connectivity.
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("cinesearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CinesearchError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            warn!("No Meilisearch API key configured; requests will be sent unauthenticated");
        }

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            index_name: config.index_name.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    /// Base URL of the Meilisearch instance
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Name of the queried index
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn search_url(&self) -> String {
        format!("{}/indexes/{}/search", self.host, self.index_name)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> IndexError {
        if err.is_timeout() {
            IndexError::Unavailable(format!(
                "Request to {} timed out after {:?}",
                self.host, self.timeout
            ))
        } else if err.is_connect() {
            IndexError::Unavailable(format!("Cannot connect to {}: {}", self.host, err))
        } else {
            IndexError::Unavailable(format!("HTTP request failed: {}", err))
        }
    }

    async fn status_error(response: reqwest::Response) -> IndexError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(ErrorEnvelope {
                message,
                code: Some(code),
            }) => format!("{} ({})", message, code),
            Ok(ErrorEnvelope { message, code: None }) => message,
            Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
        };

        if status.is_server_error() {
            IndexError::Unavailable(format!("HTTP error: {} {}", status.as_u16(), detail))
        } else {
            IndexError::Query(format!("HTTP error: {} {}", status.as_u16(), detail))
        }
    }
}

/// Decode a search response body, skipping hits that are not valid records.
fn decode_hits(body: &str) -> std::result::Result<IndexHits, IndexError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)
        .map_err(|e| IndexError::Query(format!("Undecodable search response: {}", e)))?;

    let returned = envelope.hits.len();
    let mut hits = Vec::with_capacity(returned);
    for raw in envelope.hits {
        match serde_json::from_value::<MovieRecord>(raw) {
            Ok(record) => hits.push(record),
            Err(e) => warn!("Skipping undecodable search hit: {}", e),
        }
    }

    let estimated_total = envelope
        .estimated_total_hits
        .or(envelope.total_hits)
        .unwrap_or(returned as u64);

    Ok(IndexHits {
        hits,
        estimated_total,
    })
}

#[async_trait]
impl SearchIndex for MeilisearchIndex {
    async fn search(&self, text: &str, limit: usize) -> std::result::Result<IndexHits, IndexError> {
        let request = self
            .client
            .post(self.search_url())
            .json(&json!({ "q": text, "limit": limit }));

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            warn!(index = %self.index_name, "Search request failed: {}", err);
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        let hits = decode_hits(&body)?;
        debug!(
            index = %self.index_name,
            returned = hits.hits.len(),
            estimated_total = hits.estimated_total,
            "Search request succeeded"
        );
        Ok(hits)
    }

    async fn health(&self) -> std::result::Result<(), IndexError> {
        let response = self
            .authorize(self.client.get(format!("{}/health", self.host)))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            Err(IndexError::Unavailable(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IndexConfig {
        IndexConfig {
            host: "http://127.0.0.1:7700/".to_string(),
            api_key: Some("secret-key".to_string()),
            index_name: "movies".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_new_trims_host() {
        let index = MeilisearchIndex::new(&config()).unwrap();
        assert_eq!(index.host(), "http://127.0.0.1:7700");
        assert_eq!(index.search_url(), "http://127.0.0.1:7700/indexes/movies/search");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let index = MeilisearchIndex::new(&config()).unwrap();
        let debug = format!("{:?}", index);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_decode_hits_with_estimate() {
        let body = r#"{
            "hits": [{"id": 1, "title": "Heat"}, {"id": 2, "title": "Heat Wave"}],
            "estimatedTotalHits": 37,
            "processingTimeMs": 1
        }"#;
        let hits = decode_hits(body).unwrap();
        assert_eq!(hits.hits.len(), 2);
        assert_eq!(hits.estimated_total, 37);
    }

    #[test]
    fn test_decode_hits_falls_back_to_hit_count() {
        let body = r#"{ "hits": [{"id": 1, "title": "Heat"}] }"#;
        assert_eq!(decode_hits(body).unwrap().estimated_total, 1);

        let body = r#"{ "hits": [{"id": 1}], "totalHits": 12 }"#;
        assert_eq!(decode_hits(body).unwrap().estimated_total, 12);
    }

    #[test]
    fn test_decode_hits_skips_bad_documents() {
        let body = r#"{
            "hits": [{"title": "No Id"}, {"id": 5, "title": "Alien"}, {"id": "x"}],
            "estimatedTotalHits": 3
        }"#;
        let hits = decode_hits(body).unwrap();
        assert_eq!(hits.hits.len(), 1);
        assert_eq!(hits.hits[0].id, 5);
        assert_eq!(hits.estimated_total, 3);
    }

    #[test]
    fn test_decode_hits_rejects_garbage() {
        assert!(matches!(decode_hits("not json"), Err(IndexError::Query(_))));
        assert!(matches!(decode_hits(r#"{"results": []}"#), Err(IndexError::Query(_))));
    }
}
