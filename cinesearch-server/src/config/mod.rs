//! Server configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Origins allowed to make cross-origin requests; empty allows any origin
    pub cors_origins: Vec<String>,

    /// Path to the Cinesearch configuration file, if any
    pub config_file_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_origins: Vec::new(),
            config_file_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        Self::from_cli_and_lookup(cli_args, |key| env::var(key).ok())
    }

    fn from_cli_and_lookup<F>(cli_args: crate::cli::CliArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Some(port) = lookup("CINESEARCH_PORT") {
            config.port = port.trim().parse()?;
        }

        if let Some(origins) = cli_args.cors_origins {
            config.cors_origins = origins;
        } else if let Some(origins) = lookup("CINESEARCH_CORS_ORIGINS") {
            config.cors_origins = parse_origin_list(&origins);
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file_path = Some(config_path);
        } else if let Some(config_path) = lookup("CINESEARCH_CONFIG_FILE") {
            config.config_file_path = Some(PathBuf::from(config_path));
        }

        Ok(config)
    }

    /// Whether every origin may make cross-origin requests
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origin_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
