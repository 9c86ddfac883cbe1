//! Configuration types for DMS connections.
//!
//! Responsibilities:
//! - Hold validated connection and authentication settings.
//! - Provide constructor helpers for the common setups.
//!
//! Does NOT handle:
//! - Loading values from the environment (see `loader.rs`).
//! - Performing any network I/O.
//!
//! Invariants:
//! - The API key is wrapped in [`SecretString`] and never printed by
//!   `Debug` or `Display` implementations.
//! - `hostname` is a bare host (no scheme, no trailing slash).

use std::time::Duration;

use secrecy::SecretString;

use crate::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Complete configuration for constructing a DMS client.
#[derive(Clone, Debug)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
}

/// Connection settings for the DMS host.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// Bare hostname of the DMS instance, e.g. `example.d-velop.cloud`.
    pub hostname: String,
    /// Repository id to address. When `None`, the client discovers the
    /// first repository listed by the server.
    pub repository: Option<String>,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

/// Authentication settings.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Bearer API key for the DMS tenant.
    pub api_key: SecretString,
}

impl Config {
    /// Create a configuration with an API key and default connection
    /// settings.
    pub fn new(hostname: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                hostname: normalize_hostname(hostname.into()),
                repository: None,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            auth: AuthConfig { api_key },
        }
    }

    /// Pin the repository id instead of discovering it.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.connection.repository = Some(repository.into());
        self
    }
}

/// Strip a scheme prefix and trailing slashes from a configured host.
///
/// Users routinely paste full URLs; the client only needs the host.
fn normalize_hostname(hostname: String) -> String {
    let stripped = hostname
        .strip_prefix("https://")
        .or_else(|| hostname.strip_prefix("http://"))
        .unwrap_or(&hostname);
    stripped.trim_end_matches('/').to_string()
}
