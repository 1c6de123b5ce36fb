//! Configuration module for mealfinder.
//!
//! This module provides all configuration types and loading functionality.
//! Configuration is loaded from a YAML file; every section has defaults, so
//! running without a file talks to the public recipe service on port 5000.

mod logging;
mod mealdb;
mod server;

pub use logging::{LogFormat, LogLevel, LogOutput, LoggingConfig};
pub use mealdb::MealDbConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MealFinderError;

/// Environment variable overriding `mealdb.base_url`.
pub const BASE_URL_ENV: &str = "MEALDB_BASE_URL";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,

    /// Recipe service configuration.
    pub mealdb: MealDbConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from an optional path.
    /// If path is None, uses default search paths.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, MealFinderError> {
        let mut config = match path {
            Some(p) => Self::load_from_path(p)?,
            None => {
                let default_paths = [
                    "/etc/mealfinder/config.yaml",
                    "/etc/mealfinder/config.yml",
                    "config.yaml",
                    "config.yml",
                ];

                match default_paths.iter().find(|p| Path::new(p).exists()) {
                    Some(p) => Self::load_from_path(p)?,
                    None => Self::default(),
                }
            }
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.apply_base_url_override(base_url)?;
        }

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, MealFinderError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MealFinderError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::load_from_str(&content)
    }

    /// Loads configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self, MealFinderError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| MealFinderError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Replaces the recipe service base URL and re-validates.
    pub fn apply_base_url_override(&mut self, base_url: String) -> Result<(), MealFinderError> {
        self.mealdb.base_url = base_url;
        self.validate()
    }

    /// Validates configuration.
    pub fn validate(&self) -> Result<(), MealFinderError> {
        if self.server.port == 0 {
            return Err(MealFinderError::config("server.port must be > 0"));
        }

        let base_url = self.mealdb.base_url.trim();
        if base_url.is_empty() {
            return Err(MealFinderError::config("mealdb.base_url must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(MealFinderError::config(format!(
                "mealdb.base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }

        if self.mealdb.timeout_seconds == 0 {
            return Err(MealFinderError::config("mealdb.timeout_seconds must be > 0"));
        }

        Ok(())
    }
}
