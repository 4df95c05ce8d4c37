//! Configuration management for apiex.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `apiex.toml` file
//! 3. User config `~/.config/apiex/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Connection settings for the Apigee management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApigeeConfig {
    /// Base URL of the management API.
    pub base_url: String,

    /// Base URL of the Apigee console, used to build proxy overview links.
    pub console_url: String,

    /// OAuth bearer token (can also be set via the APIGEE_TOKEN variable).
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for ApigeeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_APIGEE_URL.to_string(),
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            token: None,
        }
    }
}

impl ApigeeConfig {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./apiex.toml` (project local)
    /// 2. `~/.config/apiex/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("apiex.toml").exists() {
            return Self::from_file("apiex.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("apiex").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: ApigeeConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("APIEX_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(url) = std::env::var("APIEX_CONSOLE_URL") {
            self.console_url = url;
        }
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            self.token = Some(token);
        }
    }

    /// Get the bearer token from config or environment.
    pub fn token_or_env(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
    }
}
