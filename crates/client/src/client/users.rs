//! Identity-provider user methods for [`DmsClient`].

use crate::client::DmsClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::DmsUser;

impl DmsClient {
    /// List the tenant's users from the identity provider.
    pub async fn get_users(&self) -> Result<Vec<DmsUser>> {
        endpoints::list_users(
            &self.http,
            &self.host_base,
            &self.api_key,
            &self.user_agent,
            Some(&self.cache),
        )
        .await
    }
}
