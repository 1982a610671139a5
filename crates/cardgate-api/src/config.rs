//! Gate server configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default time budget for validating one card.
pub const DEFAULT_VALIDATION_TIMEOUT_MS: u64 = 2000;

/// Errors during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(String),
    /// An environment variable is set but unusable.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// Variable name.
        var: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Gate server runtime configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Path of the TOML trust policy file.
    pub trust_policy_file: PathBuf,
    /// TCP address to bind (e.g. `0.0.0.0:8080`).
    pub bind_addr: String,
    /// Bearer token required on `/v1` routes, if any.
    pub access_token: Option<String>,
    /// Time budget for validating one card.
    pub validation_timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if `TRUST_POLICY_FILE` is not set, or
    /// [`ConfigError::Invalid`] if `VALIDATION_TIMEOUT_MS` is not a positive
    /// integer or `ACCESS_TOKEN` is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let trust_policy_file = lookup("TRUST_POLICY_FILE")
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::Missing("TRUST_POLICY_FILE".to_owned()))?;

        let access_token = match lookup("ACCESS_TOKEN") {
            Some(token) if token.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    var: "ACCESS_TOKEN".to_owned(),
                    reason: "must not be empty when set".to_owned(),
                })
            }
            other => other,
        };

        let validation_timeout = match lookup("VALIDATION_TIMEOUT_MS") {
            None => Duration::from_millis(DEFAULT_VALIDATION_TIMEOUT_MS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "VALIDATION_TIMEOUT_MS".to_owned(),
                        reason: format!("expected a positive number of milliseconds, got '{raw}'"),
                    })
                }
            },
        };

        Ok(Self {
            trust_policy_file,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_owned()),
            access_token,
            validation_timeout,
        })
    }
}
