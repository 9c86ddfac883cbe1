//! Main DMS API client and API methods.
//!
//! [`DmsClient`] is constructed through [`DmsClient::builder`], which
//! performs the one-time repository discovery and schema fetch. After
//! that the client is effectively stateless request/response: the only
//! held state is the immutable schema snapshot and the response cache,
//! both safe for concurrent reads.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - [`cache`]: Injectable response cache
//! - `documents`: Search, retrieval, update, archive and download
//! - `properties`: Display-name resolution and property-bag builders
//! - `users`: Identity-provider user listing
//!
//! # What this module does NOT handle
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retries, timeouts beyond the HTTP client's own, or rollback of
//!   multi-step workflows

pub mod builder;
pub mod cache;
pub mod documents;
pub mod properties;
mod users;

use secrecy::SecretString;

use crate::models::Mappings;

/// Client for a d.velop-style DMS HTTP API.
///
/// # Creating a client
///
/// ```rust,ignore
/// use dms_client::DmsClient;
/// use secrecy::SecretString;
///
/// let client = DmsClient::builder()
///     .hostname("tenant.dms.example.com")
///     .api_key(SecretString::new("my-key".to_string().into()))
///     .build()
///     .await?;
/// ```
///
/// Construction fails fast when the repository listing or the schema
/// endpoint is unreachable or malformed; there is no retry.
#[derive(Debug)]
pub struct DmsClient {
    pub(crate) http: reqwest::Client,
    /// Scheme + host, e.g. `https://tenant.dms.example.com`.
    pub(crate) host_base: String,
    /// Repository base URL, `<host_base>/dms/r/<repository>`.
    pub(crate) repo_url: String,
    pub(crate) repository: String,
    pub(crate) api_key: SecretString,
    pub(crate) user_agent: String,
    /// Schema snapshot, fetched once at construction and immutable for
    /// the client's lifetime.
    pub(crate) mappings: Mappings,
    pub(crate) cache: cache::ResponseCache,
}

impl DmsClient {
    /// Create a new client builder.
    pub fn builder() -> builder::DmsClientBuilder {
        builder::DmsClientBuilder::new()
    }

    /// The id of the repository this client addresses.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Scheme + host of the DMS instance.
    pub fn host_base(&self) -> &str {
        &self.host_base
    }

    /// The cached repository schema.
    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    /// Base URL of the repository's configuration API
    /// (`/dmsconfig/r/<repository>/`), for callers addressing config
    /// resources directly.
    pub fn config_base_url(&self) -> String {
        format!("{}/dmsconfig/r/{}/", self.host_base, self.repository)
    }

    /// Source id of the repository, as used in search and update
    /// payloads.
    pub(crate) fn source_id(&self) -> String {
        format!("/dms/r/{}/source", self.repository)
    }
}
