//! Client-side response caching for slowly-changing DMS resources.
//!
//! The repository schema, the repository listing and the identity
//! provider's user list change rarely; caching them for a time-boxed
//! window avoids re-reading them on every client operation. Document
//! reads and searches are never cached.
//!
//! The cache is an explicit collaborator injected into the client
//! (builder option), not ambient process state, so tests and multiple
//! client instances stay isolated.
//!
//! # Invariants
//! - Only GET responses are cached.
//! - TTL is enforced per entry.
//! - A disabled cache behaves like a permanent miss.

use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use moka::policy::EvictionPolicy;
use tracing::{debug, trace};

use dms_config::constants::{
    DEFAULT_CACHE_SIZE, DEFAULT_REPOSITORY_CACHE_TTL_SECS, DEFAULT_SCHEMA_CACHE_TTL_SECS,
    DEFAULT_USERS_CACHE_TTL_SECS,
};

/// A cached response body.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// The response body text.
    pub body: String,
    /// When this entry was cached.
    pub cached_at: Instant,
    /// Time-to-live for this entry.
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(body: String, ttl: Duration) -> Self {
        Self {
            body,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check if this entry has expired relative to a reference time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.cached_at) > self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Cache key identifying a GET request.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CacheKey {
    /// The full request URL, without query parameters.
    pub url: String,
    /// Query parameters, sorted for key stability.
    pub query_params: Vec<(String, String)>,
}

impl CacheKey {
    pub fn new(url: String, mut query_params: Vec<(String, String)>) -> Self {
        query_params.sort_by(|a, b| a.0.cmp(&b.0));
        Self { url, query_params }
    }
}

/// Cache policy for a URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// Never cache.
    NoCache,
    /// Cache with the given TTL.
    CacheWithTtl(Duration),
}

/// TTL configuration for the cacheable resource classes.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// TTL for the repository schema (`.../source`).
    pub schema_ttl: Duration,
    /// TTL for the repository listing (`.../dms/r/`).
    pub repositories_ttl: Duration,
    /// TTL for identity-provider user listings.
    pub users_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            schema_ttl: Duration::from_secs(DEFAULT_SCHEMA_CACHE_TTL_SECS),
            repositories_ttl: Duration::from_secs(DEFAULT_REPOSITORY_CACHE_TTL_SECS),
            users_ttl: Duration::from_secs(DEFAULT_USERS_CACHE_TTL_SECS),
        }
    }
}

impl CacheConfig {
    /// Determine the policy for a URL.
    ///
    /// Only the slowly-changing resources are cacheable; everything
    /// else (searches, document reads, blobs) is [`CachePolicy::NoCache`].
    pub fn policy_for(&self, url: &str) -> CachePolicy {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with("/source") {
            CachePolicy::CacheWithTtl(self.schema_ttl)
        } else if path.ends_with("/dms/r/") {
            CachePolicy::CacheWithTtl(self.repositories_ttl)
        } else if path.contains("/identityprovider/") {
            CachePolicy::CacheWithTtl(self.users_ttl)
        } else {
            CachePolicy::NoCache
        }
    }
}

/// Client-side response cache.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    inner: MokaCache<CacheKey, CacheEntry>,
    config: CacheConfig,
    enabled: bool,
}

impl ResponseCache {
    /// Create a cache with default capacity and TTL policy.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_SIZE)
    }

    /// Create a cache with a specific capacity.
    pub fn with_capacity(capacity: u64) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(capacity)
            .eviction_policy(EvictionPolicy::lru())
            .support_invalidation_closures()
            .build();

        Self {
            inner: cache,
            config: CacheConfig::default(),
            enabled: true,
        }
    }

    /// Create a disabled cache (permanent miss).
    pub fn disabled() -> Self {
        Self {
            inner: MokaCache::builder().max_capacity(1).build(),
            config: CacheConfig::default(),
            enabled: false,
        }
    }

    /// Replace the TTL configuration.
    pub fn with_config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// Check if caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Determine the policy for a URL.
    pub fn policy_for(&self, url: &str) -> CachePolicy {
        if !self.enabled {
            return CachePolicy::NoCache;
        }
        self.config.policy_for(url)
    }

    /// Get an entry, honoring expiry.
    pub async fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        if !self.enabled {
            return None;
        }

        match self.inner.get(key).await {
            Some(entry) if entry.is_expired() => {
                trace!(url = key.url, "Cache entry expired");
                self.inner.invalidate(key).await;
                None
            }
            Some(entry) => {
                trace!(url = key.url, "Cache hit");
                Some(entry)
            }
            None => {
                trace!(url = key.url, "Cache miss");
                None
            }
        }
    }

    /// Store an entry.
    pub async fn insert(&self, key: CacheKey, entry: CacheEntry) {
        if !self.enabled {
            return;
        }
        trace!(url = key.url, "Caching response");
        self.inner.insert(key, entry).await;
    }

    /// Invalidate all entries whose URL starts with `prefix`.
    ///
    /// Called after mutating operations so stale reads of the touched
    /// resource class do not outlive the mutation.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let prefix_owned = prefix.to_string();
        self.inner
            .invalidate_entries_if(move |key, _| key.url.starts_with(&prefix_owned))
            .ok();
        debug!(prefix, "Invalidated cache entries");
    }

    /// Number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
