//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::search::ScoringConfig;
use std::path::Path;
use std::time::Duration;

/// Builder for creating CinesearchConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: CinesearchConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: CinesearchConfig::default(),
        }
    }

    /// Set the Meilisearch base URL.
    pub fn with_index_host(mut self, host: impl Into<String>) -> Self {
        self.config.index.host = host.into();
        self
    }

    /// Set the API key sent as a bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.index.api_key = Some(api_key.into());
        self
    }

    /// Set the name of the movie index.
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.config.index.index_name = index_name.into();
        self
    }

    /// Set the per-request index timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.index.timeout = timeout;
        self
    }

    /// Set the number of results returned when no limit is given.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.config.search.default_limit = limit;
        self
    }

    /// Replace the relevance score weights.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Create a configuration for development against a local Meilisearch.
    ///
    /// Debug-level, human-readable logging.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
    }

    /// Create a configuration for automated testing.
    ///
    /// Short timeouts and quiet logging so failing tests fail fast.
    pub fn testing() -> Self {
        Self::new()
            .with_timeout(Duration::from_secs(2))
            .with_log_level(LogLevel::Warn)
            .with_log_format(LogFormat::Compact)
    }

    /// Create a production configuration.
    ///
    /// Info-level JSON logs for aggregation.
    pub fn production() -> Self {
        Self::new()
            .with_log_level(LogLevel::Info)
            .with_log_format(LogFormat::Json)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<CinesearchConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
