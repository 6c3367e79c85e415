//! Application configuration management.
//!
//! This module handles loading and saving the client configuration, which
//! includes the server URL and the last used login email.
//!
//! Configuration is stored at `~/.config/lojinha/config.json`; the server
//! URL can be overridden with the `LOJINHA_SERVER_URL` environment variable.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "lojinha";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Server used when nothing else is configured
const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Environment variable overriding the configured server URL
const SERVER_URL_ENV: &str = "LOJINHA_SERVER_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub server_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the server base URL: env var, then config file, then default.
    pub fn server_url(&self) -> String {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }
        self.server_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted auth token.
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
