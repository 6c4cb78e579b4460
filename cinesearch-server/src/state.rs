//! Application state management

use cinesearch::config::SearchConfig;
use cinesearch::core::Reranker;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Reranking pipeline over the configured search index
    pub reranker: Reranker,

    /// Request defaults
    pub search: SearchConfig,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(reranker: Reranker, search: SearchConfig, config: ServerConfig) -> Self {
        Self {
            reranker,
            search,
            config,
        }
    }
}
