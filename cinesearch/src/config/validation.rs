//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;
use crate::core::{MAX_LIMIT, MIN_LIMIT};

/// Validate the entire configuration.
pub fn validate_config(config: &CinesearchConfig) -> Result<(), ConfigError> {
    validate_index_config(&config.index)?;
    validate_search_config(&config.search)?;

    config
        .scoring
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("Invalid scoring config: {}", e)))?;

    Ok(())
}

fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Index host cannot be empty".to_string(),
        ));
    }

    let url = reqwest::Url::parse(config.host.trim()).map_err(|e| {
        ConfigError::ValidationError(format!("Invalid index host '{}': {}", config.host, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "Index host must use http or https, got '{}'",
            url.scheme()
        )));
    }

    let name = config.index_name.trim();
    if name.is_empty() {
        return Err(ConfigError::ValidationError(
            "Index name cannot be empty".to_string(),
        ));
    }
    if name.contains('/') {
        return Err(ConfigError::ValidationError(format!(
            "Index name cannot contain '/': {}",
            config.index_name
        )));
    }

    if config.timeout.is_zero() {
        return Err(ConfigError::ValidationError(
            "Index timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&config.default_limit) {
        return Err(ConfigError::ValidationError(format!(
            "Default limit must be between {} and {}, got {}",
            MIN_LIMIT, MAX_LIMIT, config.default_limit
        )));
    }

    Ok(())
}
