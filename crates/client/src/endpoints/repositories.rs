//! Repository listing endpoint.

use reqwest::Client;
use secrecy::SecretString;

use crate::client::cache::ResponseCache;
use crate::endpoints::request::get_json;
use crate::error::{DmsError, Result};

/// Fetch the repository listing and return the first entry's id.
///
/// Used during construction when no repository was configured.
pub async fn first_repository_id(
    http: &Client,
    host_base: &str,
    api_key: &SecretString,
    user_agent: &str,
    cache: Option<&ResponseCache>,
) -> Result<String> {
    let url = format!("{host_base}/dms/r/");
    let value = get_json(http, &url, api_key, user_agent, &[], cache).await?;

    value
        .get("repositories")
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("id"))
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            DmsError::SchemaMismatch(format!("repository listing at {url} contains no repository"))
        })
}
