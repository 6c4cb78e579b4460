//! In-memory [`SearchIndex`] over a fixed list of records.
//!
//! Matching is token based: a record matches when any query token occurs in
//! its title, original title, overview or release year. Matches are returned in
//! insertion order. Used for tests, demos and offline runs against a fixture file.

use std::path::Path;

use async_trait::async_trait;

use crate::models::MovieRecord;
use crate::search::similarity::{token_set, tokenize};
use crate::{CinesearchError, Result};

use super::{IndexError, IndexHits, SearchIndex};

#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    records: Vec<MovieRecord>,
    failure: Option<IndexError>,
}

impl InMemoryIndex {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// Load records from a JSON array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<MovieRecord> = serde_json::from_str(json)
            .map_err(|e| CinesearchError::Configuration(format!("Invalid fixture records: {}", e)))?;
        Ok(Self::new(records))
    }

    /// Load records from a file containing a JSON array.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CinesearchError::Configuration(format!(
                "Failed to read fixture file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Make every call fail with `error`.
    pub fn with_failure(mut self, error: IndexError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(record: &MovieRecord, query_tokens: &[String]) -> bool {
        let mut searchable = token_set(&record.title);
        for field in [&record.original_title, &record.overview] {
            if let Some(text) = field {
                searchable.extend(tokenize(text));
            }
        }
        if let Some(year) = record.effective_release_year() {
            searchable.insert(year.to_string());
        }

        query_tokens.iter().any(|token| searchable.contains(token))
    }
}

#[async_trait]
impl SearchIndex for InMemoryIndex {
    async fn search(&self, text: &str, limit: usize) -> std::result::Result<IndexHits, IndexError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let query_tokens = tokenize(text);
        let matched: Vec<&MovieRecord> = if query_tokens.is_empty() {
            self.records.iter().collect()
        } else {
            self.records
                .iter()
                .filter(|record| Self::matches(record, &query_tokens))
                .collect()
        };

        Ok(IndexHits {
            estimated_total: matched.len() as u64,
            hits: matched.into_iter().take(limit).cloned().collect(),
        })
    }

    async fn health(&self) -> std::result::Result<(), IndexError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
