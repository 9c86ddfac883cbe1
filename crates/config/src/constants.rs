//! Centralized constants for the DMS client workspace.
//!
//! Default values shared between the config loader and the client
//! builder, kept in one place to avoid magic number duplication.

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default TTL for the repository schema ("source" mappings) cache,
/// in seconds.
pub const DEFAULT_SCHEMA_CACHE_TTL_SECS: u64 = 7200;

/// Default TTL for the repository listing cache, in seconds.
pub const DEFAULT_REPOSITORY_CACHE_TTL_SECS: u64 = 7200;

/// Default TTL for identity-provider user listings, in seconds.
pub const DEFAULT_USERS_CACHE_TTL_SECS: u64 = 3600;

/// Default response cache capacity (number of entries).
pub const DEFAULT_CACHE_SIZE: u64 = 100;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("dms-client/", env!("CARGO_PKG_VERSION"));
