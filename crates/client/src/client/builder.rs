//! Client builder for constructing [`DmsClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required settings (hostname, API key)
//! - Configuring the underlying HTTP client (timeout, redirects)
//! - Running the construction-time I/O: repository discovery when no
//!   repository is pinned, and the one-time schema fetch
//!
//! # Invariants
//! - `hostname` and `api_key` are required and must be set before
//!   `build()`
//! - Construction fails fast on an unreachable or malformed schema
//!   endpoint; there is no retry
//! - The host base never carries a trailing slash

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use dms_config::Config;
use dms_config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

use crate::client::DmsClient;
use crate::client::cache::ResponseCache;
use crate::endpoints;
use crate::error::{DmsError, Result};

/// Builder for creating a new [`DmsClient`].
pub struct DmsClientBuilder {
    hostname: Option<String>,
    api_key: Option<SecretString>,
    repository: Option<String>,
    user_agent: String,
    timeout: Duration,
    cache: Option<ResponseCache>,
}

impl Default for DmsClientBuilder {
    fn default() -> Self {
        Self {
            hostname: None,
            api_key: None,
            repository: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache: None,
        }
    }
}

impl DmsClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DMS hostname.
    ///
    /// A bare host is addressed via HTTPS; an explicit `http://` or
    /// `https://` prefix is honored as given (useful against local
    /// test servers).
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Set the tenant API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Pin the repository id.
    ///
    /// When not set, the first repository listed by the server is
    /// selected during `build()`.
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Set the user agent sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the HTTP request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Inject a response cache.
    ///
    /// Clones of one [`ResponseCache`] share storage, so multiple
    /// clients can share a cache; pass [`ResponseCache::disabled`] to
    /// opt out of caching entirely. Defaults to a fresh enabled cache.
    pub fn cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Seed the builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.hostname = Some(config.connection.hostname.clone());
        self.api_key = Some(config.auth.api_key.clone());
        self.repository = config.connection.repository.clone();
        self.timeout = config.connection.timeout;
        self.user_agent = config.connection.user_agent.clone();
        self
    }

    /// Derive the scheme+host base from the configured hostname.
    fn host_base_from(hostname: &str) -> String {
        let trimmed = hostname.trim_end_matches('/');
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        }
    }

    /// Build the [`DmsClient`].
    ///
    /// Performs the construction-time requests: repository discovery
    /// (when no repository is pinned) and the one-time schema fetch.
    ///
    /// # Errors
    ///
    /// Returns [`DmsError::Configuration`] when hostname or API key is
    /// missing, and propagates any failure of the discovery or schema
    /// requests — the client is never constructed with a partial or
    /// unverified schema.
    pub async fn build(self) -> Result<DmsClient> {
        let hostname = self
            .hostname
            .ok_or_else(|| DmsError::Configuration("hostname is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| DmsError::Configuration("api_key is required".to_string()))?;

        let host_base = Self::host_base_from(&hostname);
        let cache = self.cache.unwrap_or_default();

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()?;

        let repository = match self.repository {
            Some(repository) => repository,
            None => {
                endpoints::first_repository_id(
                    &http,
                    &host_base,
                    &api_key,
                    &self.user_agent,
                    Some(&cache),
                )
                .await?
            }
        };

        let repo_url = format!("{host_base}/dms/r/{repository}");
        let mappings = endpoints::get_mappings(
            &http,
            &repo_url,
            &api_key,
            &self.user_agent,
            Some(&cache),
        )
        .await?;

        debug!(
            repository,
            properties = mappings.properties.len(),
            categories = mappings.categories.len(),
            "Connected to DMS repository"
        );

        Ok(DmsClient {
            http,
            host_base,
            repo_url,
            repository,
            api_key,
            user_agent: self.user_agent,
            mappings,
            cache,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_base_from_bare_host() {
        assert_eq!(
            DmsClientBuilder::host_base_from("dms.example.com"),
            "https://dms.example.com"
        );
    }

    #[test]
    fn test_host_base_from_explicit_scheme() {
        assert_eq!(
            DmsClientBuilder::host_base_from("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            DmsClientBuilder::host_base_from("https://dms.example.com/"),
            "https://dms.example.com"
        );
    }

    #[tokio::test]
    async fn test_build_missing_hostname() {
        let err = DmsClientBuilder::new()
            .api_key(SecretString::new("key".to_string().into()))
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, DmsError::Configuration(ref m) if m.contains("hostname")));
    }

    #[tokio::test]
    async fn test_build_missing_api_key() {
        let err = DmsClientBuilder::new()
            .hostname("dms.example.com")
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, DmsError::Configuration(ref m) if m.contains("api_key")));
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let config = Config::new(
            "dms.example.com",
            SecretString::new("key".to_string().into()),
        )
        .with_repository("repo-9");

        let builder = DmsClientBuilder::new().from_config(&config);
        assert_eq!(builder.hostname.as_deref(), Some("dms.example.com"));
        assert_eq!(builder.repository.as_deref(), Some("repo-9"));
        assert_eq!(builder.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
