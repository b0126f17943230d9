use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gitea_api::{Integration, TransportConfig};
use serde::{Deserialize, Serialize};

pub const API_URL_ENV: &str = "GITEA_API_URL";
pub const API_KEY_ENV: &str = "GITEA_API_KEY";

/// Get the default config file location.
///
/// # Errors
///
/// Returns an error if the user config directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    let mut path =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Failed to get config dir"))?;
    path.push("gitea-api");
    path.push("config.toml");
    Ok(path)
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub http: HttpSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Config {
    /// Load a config file; a missing file yields an empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Override values with `GITEA_API_URL` / `GITEA_API_KEY` from the environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Override values from an arbitrary variable lookup; empty values are ignored
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(url) = lookup(API_URL_ENV) {
            self.api_url = Some(url);
        }
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        self
    }

    /// Credentials for the request helpers.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing setting.
    pub fn integration(&self) -> Result<Integration> {
        let api_url = self.api_url.clone().ok_or_else(|| {
            anyhow::anyhow!("API URL not configured. Set api_url in the config file or {API_URL_ENV}")
        })?;
        let api_key = self.api_key.clone().ok_or_else(|| {
            anyhow::anyhow!("API key not configured. Set api_key in the config file or {API_KEY_ENV}")
        })?;
        Ok(Integration::new(api_url, api_key))
    }

    #[must_use]
    pub fn transport_config(&self) -> TransportConfig {
        let mut config = TransportConfig::default();
        if let Some(timeout) = self.http.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(agent) = &self.http.user_agent {
            config.user_agent.clone_from(agent);
        }
        config
    }
}
