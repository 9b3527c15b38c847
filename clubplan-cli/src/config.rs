//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration at ~/.config/clubplan/config.toml
///
/// `store_url`/`store_key` point at the hosted backend project; the cache
/// path defaults into the platform data directory.
#[derive(Deserialize, Clone)]
pub struct Config {
    pub store_url: String,
    pub store_key: String,

    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("clubplan");
        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Config> {
        let path = Self::config_path()?;
        let contents = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "No config found at {} (expected store_url and store_key)",
                path.display()
            )
        })?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Where the imported-match cache lives.
    pub fn cache_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.cache_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("clubplan");
        Ok(data_dir.join("imported_matches.json"))
    }
}
