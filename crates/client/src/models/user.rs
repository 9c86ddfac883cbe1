//! Identity-provider user model.

use serde::Deserialize;

/// Nested name record of an identity-provider user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawIdentityName {
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawIdentityEmail {
    pub value: String,
}

/// Wire shape of an identity-provider user record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawIdentityUser {
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<RawIdentityName>,
    #[serde(default)]
    pub emails: Vec<RawIdentityEmail>,
}

/// A DMS user, normalized from the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DmsUser {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    /// First entry of the user's email list, `None` when the list is
    /// empty.
    pub email: Option<String>,
}

impl From<RawIdentityUser> for DmsUser {
    fn from(raw: RawIdentityUser) -> Self {
        let name = raw.name.unwrap_or_default();
        Self {
            id: raw.id,
            username: raw.user_name,
            first_name: name.given_name,
            last_name: name.family_name,
            display_name: raw.display_name,
            email: raw.emails.into_iter().next().map(|e| e.value),
        }
    }
}
