//! Repository schema ("source") endpoint.

use reqwest::Client;
use secrecy::SecretString;

use crate::client::cache::ResponseCache;
use crate::endpoints::request::get_json;
use crate::error::{DmsError, Result};
use crate::models::Mappings;

/// Fetch the property/category schema of a repository.
///
/// `repo_url` is the repository base, e.g.
/// `https://host/dms/r/<repository>`.
pub async fn get_mappings(
    http: &Client,
    repo_url: &str,
    api_key: &SecretString,
    user_agent: &str,
    cache: Option<&ResponseCache>,
) -> Result<Mappings> {
    let url = format!("{repo_url}/source");
    let value = get_json(http, &url, api_key, user_agent, &[], cache).await?;

    serde_json::from_value(value)
        .map_err(|e| DmsError::SchemaMismatch(format!("malformed source mappings from {url}: {e}")))
}
