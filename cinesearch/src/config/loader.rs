//! Configuration loader.
//!
//! This module provides functionality to load configuration from multiple sources.

use super::{
    ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, MEILI_ENV_VARS, Result, models::*, validation,
};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// Configuration loader that handles loading from multiple sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Create a new configuration loader with default values.
    pub fn new() -> Self {
        let figment = Figment::new().merge(Serialized::defaults(CinesearchConfig::default()));
        Self { figment }
    }

    /// Load configuration from a file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let figment = std::mem::take(&mut self.figment);
        self.figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => {
                self.figment = figment;
                return Err(ConfigError::FileLoadError(format!(
                    "Unsupported file format: {}",
                    path.display()
                )));
            }
        };

        Ok(self)
    }

    /// Attempt to load from default configuration file locations.
    ///
    /// The first existing file in the working directory wins; the XDG config
    /// directory (`config.{toml,yaml,yml,json}`) is layered on top.
    pub fn load_default_files(&mut self) -> &mut Self {
        for file in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(file);
            if path.exists() && self.load_file(&path).is_ok() {
                break;
            }
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("org", "cinesearch", "cinesearch") {
            let config_dir = proj_dirs.config_dir();

            for ext in &["toml", "yaml", "yml", "json"] {
                let path = config_dir.join(format!("config.{}", ext));
                if path.exists() && self.load_file(&path).is_ok() {
                    break;
                }
            }
        }

        self
    }

    /// Load configuration from `CINESEARCH_*` environment variables.
    ///
    /// Nested keys use a double underscore: `CINESEARCH_INDEX__HOST`.
    pub fn load_env(&mut self) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(Env::prefixed(ENV_PREFIX).split("__"));
        self.figment = figment;
        self
    }

    /// Load `MEILI_HOST`, `MEILI_MASTER_KEY` and `MEILI_INDEX_NAME`.
    ///
    /// Values are taken verbatim as strings; blank variables are ignored.
    pub fn load_meili_env(&mut self) -> &mut Self {
        for (var, key) in MEILI_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    self.merge(Serialized::default(key, value));
                }
            }
        }
        self
    }

    /// Load configuration from a custom source.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        self
    }

    /// Extract and validate the configuration.
    pub fn extract(&self) -> Result<CinesearchConfig> {
        let config: CinesearchConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;

        Ok(config)
    }
}

/// Load variables from a `.env` file in the working directory (or one of its
/// parents) into the process environment.
///
/// Variables that are already set keep their value. A missing file is not an
/// error; a malformed one is. Returns the path of the file that was loaded.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(Some(path))
        }
        Err(e) if e.not_found() => Ok(None),
        Err(dotenvy::Error::LineParse(line, pos)) => Err(ConfigError::EnvLoadError(format!(
            "Failed to parse .env file near {:?} (position {})",
            line, pos
        ))),
        Err(e) => Err(ConfigError::EnvLoadError(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
