//! Layered configuration.
//!
//! Priority (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables prefixed with `TECH_RESEARCHER_` (e.g. `TECH_RESEARCHER_ENDPOINT`)
//! 3. `config.toml` (`--config PATH`, or the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_ENDPOINT;
use crate::utils::{default_config_file, default_data_dir};

pub const ENV_PREFIX: &str = "TECH_RESEARCHER_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Research backend URL
    pub endpoint: String,
    /// Where history, preferences and logs live; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Request timeout. No timeout when unset.
    pub timeout_secs: Option<u64>,
    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: None,
            timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Configured data dir, or the platform default
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

/// Load configuration from every layer.
///
/// An explicit `config_file` must exist; the platform default is optional.
pub fn load_config(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    match config_file {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(path) = default_config_file().filter(|p| p.exists()) {
                figment = figment.merge(Toml::file(path));
            }
        }
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX)).merge(Serialized::defaults(overrides));

    figment.extract().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))
}
