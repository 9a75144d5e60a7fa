//! Application configuration.
//!
//! Search order:
//! 1. `$AGRICURE_CONFIG`
//! 2. `./agricure.toml`
//! 3. Built-in defaults
//!
//! `AGRICURE_DB_PATH` and `AGRICURE_PREDICT_URL` override the loaded values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "AGRICURE_CONFIG";
pub const DB_PATH_ENV: &str = "AGRICURE_DB_PATH";
pub const PREDICT_URL_ENV: &str = "AGRICURE_PREDICT_URL";
pub const LOCAL_CONFIG_FILE: &str = "agricure.toml";

/// Config errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

/// External prediction endpoint. Without an endpoint the built-in rule
/// predictor is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` wins when set
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("agricure.db")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl AppConfig {
    /// Load using the standard search order, then apply env overrides.
    ///
    /// A file that exists but fails to load is an error; a missing one falls
    /// through to the next source.
    pub fn load() -> ConfigResult<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from_file(Path::new(&path))?,
            Err(_) => {
                let local = Path::new(LOCAL_CONFIG_FILE);
                if local.exists() {
                    Self::load_from_file(local)?
                } else {
                    tracing::debug!("No {} found, using defaults", LOCAL_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// [`AppConfig::load`]). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DB_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(url) = lookup(PREDICT_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.prediction.endpoint = Some(url);
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.prediction.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "prediction.timeout_secs must be greater than zero".into(),
            ));
        }
        if let Some(endpoint) = &self.prediction.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "prediction.endpoint must be an http(s) URL, got {:?}",
                    endpoint
                )));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
