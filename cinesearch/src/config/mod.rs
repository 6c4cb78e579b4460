//! Configuration system for Cinesearch.
//!
//! Configuration is layered: built-in defaults, then a config file, then
//! `CINESEARCH_*` environment variables, then the `MEILI_*` variables used by
//! existing Meilisearch deployments. Every layer is validated on extraction.
//!
//! Binaries call [`load_dotenv`] first so that variables kept in a `.env` file
//! reach the environment layers.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::{ConfigLoader, load_dotenv};
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "cinesearch.toml",
    "cinesearch.yaml",
    "cinesearch.yml",
    "cinesearch.json",
    ".cinesearch/config.toml",
    ".cinesearch/config.yaml",
    ".cinesearch/config.yml",
    ".cinesearch/config.json",
];

/// Environment variable prefix for Cinesearch configuration
pub const ENV_PREFIX: &str = "CINESEARCH_";

/// Legacy environment variables and the configuration keys they set
pub const MEILI_ENV_VARS: &[(&str, &str)] = &[
    ("MEILI_HOST", "index.host"),
    ("MEILI_MASTER_KEY", "index.api_key"),
    ("MEILI_INDEX_NAME", "index.index_name"),
];

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during environment loading
    #[error("Failed to load environment variables: {0}")]
    EnvLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),

    /// General error
    #[error("{0}")]
    Other(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
