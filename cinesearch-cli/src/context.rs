use std::path::Path;
use std::sync::Arc;

use cinesearch::config::{CinesearchConfig, ConfigLoader, load_dotenv};
use cinesearch::prelude::*;

pub struct CinesearchCliContext {
    pub reranker: Reranker,
    pub config: CinesearchConfig,
    /// Whether results come from a fixture file instead of Meilisearch
    pub offline: bool,
}

impl CinesearchCliContext {
    /// Load configuration (explicit file or default locations, then environment)
    /// and build the reranker.
    pub fn new(config_file: Option<&Path>, fixture: Option<&Path>) -> Result<Self> {
        Self::with_config(Self::load_config(config_file)?, fixture)
    }

    /// Resolve the effective configuration without building a client.
    ///
    /// Variables from a `.env` file in the working directory are loaded first.
    pub fn load_config(config_file: Option<&Path>) -> Result<CinesearchConfig> {
        load_dotenv()?;

        let mut loader = ConfigLoader::new();
        match config_file {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                loader.load_default_files();
            }
        }
        Ok(loader.load_env().load_meili_env().extract()?)
    }

    pub fn with_config(config: CinesearchConfig, fixture: Option<&Path>) -> Result<Self> {
        let (index, offline): (Arc<dyn SearchIndex>, bool) = match fixture {
            Some(path) => (Arc::new(InMemoryIndex::from_json_file(path)?), true),
            None => (Arc::new(MeilisearchIndex::new(&config.index)?), false),
        };

        let reranker = Reranker::new(index, config.scoring.clone())?;

        Ok(Self {
            reranker,
            config,
            offline,
        })
    }
}
