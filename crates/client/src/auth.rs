//! Bearer-token authentication helpers.
//!
//! The DMS API authenticates every request with a static tenant API
//! key. The key lives in a [`SecretString`] and is only exposed at the
//! moment the `Authorization` header is built.

use secrecy::{ExposeSecret, SecretString};

/// Build the `Authorization` header value for an API key.
pub(crate) fn bearer_header(api_key: &SecretString) -> String {
    format!("Bearer {}", api_key.expose_secret())
}
