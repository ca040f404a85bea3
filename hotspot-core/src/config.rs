use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// YAML config file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigYaml {
    /// Base URL of the detection server, used for both the API and images
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Timeout applied to each status update request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Panel configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load from `.env`/environment in dev mode, otherwise from the user's
    /// config.yaml (defaults if it does not exist yet).
    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = std::env::var("HOTSPOT_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok();
        let config = if dev_mode {
            info!("Dev mode activated - loading from environment");
            Self::from_env_vars(|key| std::env::var(key).ok())?
        } else {
            let path = Self::default_config_path()?;
            if path.exists() {
                info!("Loading config from {}", path.display());
                Self::from_yaml_file(&path)?
            } else {
                info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a config from environment-style lookups. Unset or empty
    /// variables fall back to defaults.
    pub fn from_env_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_url = var("HOTSPOT_SERVER_URL").unwrap_or_else(default_server_url);
        let request_timeout_secs = match var("HOTSPOT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::Config(format!(
                    "HOTSPOT_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?,
            None => default_request_timeout_secs(),
        };

        Ok(Self {
            server_url,
            request_timeout_secs,
        })
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let yaml: ConfigYaml = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Serialization(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            server_url: yaml.server_url,
            request_timeout_secs: yaml.request_timeout_secs,
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = ConfigYaml {
            server_url: self.server_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
        };
        let content =
            serde_yaml::to_string(&yaml).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `<config dir>/hotspot-panel/config.yaml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Config("No config directory on this platform".into()))?;
        Ok(dir.join("hotspot-panel").join("config.yaml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Config("Server URL cannot be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Config(format!(
                "Server URL must start with http:// or https://, got {url:?}"
            )));
        }
        if self.request_timeout_secs == 0 {
            warn!("Request timeout is 0, status updates will fail immediately");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Server base without a trailing slash.
    pub fn server_base(&self) -> &str {
        self.server_url.trim().trim_end_matches('/')
    }
}
