//! Environment-based configuration loading.
//!
//! Responsibilities:
//! - Read `DMS_*` environment variables (optionally seeded from a
//!   `.env` file) into a validated [`Config`].
//! - Report precise errors for missing or malformed values.
//!
//! Does NOT handle:
//! - Profile files, keyrings or any persisted state.
//!
//! Invariants:
//! - Error messages never echo the API key.
//! - Loading is side-effect free apart from the optional dotenv read.

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use tracing::debug;

use crate::constants::MAX_TIMEOUT_SECS;
use crate::types::Config;

/// Environment variable holding the DMS hostname.
pub const ENV_HOSTNAME: &str = "DMS_HOSTNAME";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "DMS_API_KEY";
/// Environment variable pinning the repository id.
pub const ENV_REPOSITORY: &str = "DMS_REPOSITORY";
/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "DMS_TIMEOUT_SECS";
/// Environment variable overriding the user agent.
pub const ENV_USER_AGENT: &str = "DMS_USER_AGENT";

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Loader for environment-based configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is honored when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DMS_HOSTNAME` or
    /// `DMS_API_KEY` is unset, and [`ConfigError::InvalidValue`] for
    /// malformed timeouts.
    pub fn from_env() -> Result<Config, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded environment from .env file");
        }

        let hostname = required_var(ENV_HOSTNAME)?;
        let api_key = SecretString::new(required_var(ENV_API_KEY)?.into());

        let mut config = Config::new(hostname, api_key);

        if let Some(repository) = optional_var(ENV_REPOSITORY) {
            config.connection.repository = Some(repository);
        }

        if let Some(raw) = optional_var(ENV_TIMEOUT_SECS) {
            config.connection.timeout = parse_timeout(&raw)?;
        }

        if let Some(agent) = optional_var(ENV_USER_AGENT) {
            config.connection.user_agent = agent;
        }

        Ok(config)
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
        var: ENV_TIMEOUT_SECS.to_string(),
        message: format!("'{raw}' is not a valid number of seconds"),
    })?;

    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidValue {
            var: ENV_TIMEOUT_SECS.to_string(),
            message: format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds"),
        });
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_minimal() {
        temp_env::with_vars(
            [
                (ENV_HOSTNAME, Some("dms.example.com")),
                (ENV_API_KEY, Some("secret-key")),
                (ENV_REPOSITORY, None),
                (ENV_TIMEOUT_SECS, None),
                (ENV_USER_AGENT, None),
            ],
            || {
                let config = ConfigLoader::from_env().unwrap();
                assert_eq!(config.connection.hostname, "dms.example.com");
                assert_eq!(config.connection.repository, None);
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_missing_hostname() {
        temp_env::with_vars(
            [
                (ENV_HOSTNAME, None),
                (ENV_API_KEY, Some("secret-key")),
            ],
            || {
                let err = ConfigLoader::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == ENV_HOSTNAME));
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_missing_api_key() {
        temp_env::with_vars(
            [
                (ENV_HOSTNAME, Some("dms.example.com")),
                (ENV_API_KEY, None),
            ],
            || {
                let err = ConfigLoader::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == ENV_API_KEY));
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_full_overrides() {
        temp_env::with_vars(
            [
                (ENV_HOSTNAME, Some("https://dms.example.com/")),
                (ENV_API_KEY, Some("secret-key")),
                (ENV_REPOSITORY, Some("repo-42")),
                (ENV_TIMEOUT_SECS, Some("90")),
                (ENV_USER_AGENT, Some("archiver/2.0")),
            ],
            || {
                let config = ConfigLoader::from_env().unwrap();
                assert_eq!(config.connection.hostname, "dms.example.com");
                assert_eq!(config.connection.repository.as_deref(), Some("repo-42"));
                assert_eq!(config.connection.timeout, Duration::from_secs(90));
                assert_eq!(config.connection.user_agent, "archiver/2.0");
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout() {
        temp_env::with_vars(
            [
                (ENV_HOSTNAME, Some("dms.example.com")),
                (ENV_API_KEY, Some("secret-key")),
                (ENV_TIMEOUT_SECS, Some("not-a-number")),
            ],
            || {
                let err = ConfigLoader::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == ENV_TIMEOUT_SECS));
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_zero_timeout_rejected() {
        temp_env::with_vars(
            [
                (ENV_HOSTNAME, Some("dms.example.com")),
                (ENV_API_KEY, Some("secret-key")),
                (ENV_TIMEOUT_SECS, Some("0")),
            ],
            || {
                assert!(ConfigLoader::from_env().is_err());
            },
        );
    }
}
