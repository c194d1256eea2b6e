//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::{parse_base_url, Config};
use crate::infrastructure::logging::logger::parse_log_level;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `backend.token_env` is blank
    #[error("Token environment variable name cannot be empty")]
    EmptyTokenEnv,

    /// `backend.request_timeout_secs` is zero
    #[error("Invalid request_timeout_secs: {0}. Must be at least 1")]
    InvalidRequestTimeout(u64),

    /// `backend.base_url` does not parse
    #[error("Invalid backend base_url '{0}': {1}")]
    InvalidBaseUrl(String, String),

    /// `credentials.path` is empty
    #[error("Credentials path cannot be empty")]
    EmptyCredentialsPath,

    /// `credentials.path` is relative
    #[error("Credentials path must be absolute: {0}")]
    RelativeCredentialsPath(String),

    /// `logging.level` is not a known level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .vertex-creds/config.yaml
    /// 3. .vertex-creds/local.yaml (optional local overrides)
    /// 4. Environment variables (VERTEX_CREDS_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(".vertex-creds/config.yaml"))
            .merge(Yaml::file(".vertex-creds/local.yaml"))
            .merge(Env::prefixed("VERTEX_CREDS_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("VERTEX_CREDS_").split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.backend.token_env.trim().is_empty() {
            return Err(ConfigError::EmptyTokenEnv);
        }

        if config.backend.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout(
                config.backend.request_timeout_secs,
            ));
        }

        if let Some(ref base_url) = config.backend.base_url {
            parse_base_url(base_url)
                .map_err(|e| ConfigError::InvalidBaseUrl(base_url.clone(), e.to_string()))?;
        }

        let path = &config.credentials.path;
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyCredentialsPath);
        }
        if !path.is_absolute() {
            return Err(ConfigError::RelativeCredentialsPath(
                path.display().to_string(),
            ));
        }

        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
