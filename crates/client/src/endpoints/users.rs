//! Identity-provider user listing endpoint.

use reqwest::Client;
use secrecy::SecretString;

use crate::client::cache::ResponseCache;
use crate::endpoints::request::get_json;
use crate::error::{DmsError, Result};
use crate::models::DmsUser;
use crate::models::user::RawIdentityUser;

/// List the tenant's users from the identity provider.
pub async fn list_users(
    http: &Client,
    host_base: &str,
    api_key: &SecretString,
    user_agent: &str,
    cache: Option<&ResponseCache>,
) -> Result<Vec<DmsUser>> {
    let url = format!("{host_base}/identityprovider/scim/users");
    let value = get_json(http, &url, api_key, user_agent, &[], cache).await?;

    let resources = value
        .get("resources")
        .and_then(|r| r.as_array())
        .cloned()
        .ok_or_else(|| {
            DmsError::SchemaMismatch(format!("user listing at {url} is missing 'resources'"))
        })?;

    resources
        .into_iter()
        .map(|item| {
            serde_json::from_value::<RawIdentityUser>(item)
                .map(DmsUser::from)
                .map_err(|e| DmsError::SchemaMismatch(format!("malformed user record: {e}")))
        })
        .collect()
}
