use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{API_TOKEN_ENV, BASE_URL_ENV, CONFIG_FILE, DEFAULT_TIMEOUT_SECS};
use crate::error::{TrackerError, TrackerResult};

/// Persisted configuration, stored as JSON in the home directory.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Connection settings after merging the environment over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl TrackerSettings {
    /// Resolve settings from `config`, letting `lookup` (normally the process
    /// environment) override the base URL and token.
    pub fn resolve<F>(config: &Config, lookup: F) -> TrackerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, fallback: &Option<String>| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| fallback.clone().filter(|v| !v.trim().is_empty()))
        };

        let base_url = pick(BASE_URL_ENV, &config.base_url).ok_or_else(|| {
            TrackerError::InvalidArgument(format!(
                "No YouTrack base URL configured. Set {} or run 'ytgraph auth'.",
                BASE_URL_ENV
            ))
        })?;
        let api_token = pick(API_TOKEN_ENV, &config.api_token).ok_or_else(|| {
            TrackerError::InvalidArgument(format!(
                "No YouTrack API token configured. Set {} or run 'ytgraph auth'.",
                API_TOKEN_ENV
            ))
        })?;

        Ok(Self {
            base_url,
            api_token,
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// Resolve against the real environment and the saved config file.
    pub fn from_env() -> TrackerResult<Self> {
        Self::resolve(&load_config(), |var| env::var(var).ok())
    }
}

pub fn config_path() -> TrackerResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE))
        .ok_or_else(|| TrackerError::ConfigError("Could not find home directory".to_string()))
}

/// Load the saved config, falling back to defaults when it is missing or unreadable.
pub fn load_config() -> Config {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "using default config");
            return Config::default();
        }
    };

    if !path.exists() {
        return Config::default();
    }

    load_config_from(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
        Config::default()
    })
}

pub fn load_config_from(path: &Path) -> TrackerResult<Config> {
    let config_str = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&config_str)?)
}

pub fn save_config_to(config: &Config, path: &Path) -> TrackerResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}
