//! User identity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile handed over by the identity provider for the signed-in caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityProfile {
    /// Provider-side user id
    pub external_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub email_addresses: Vec<String>,
}

impl IdentityProfile {
    /// "First Last" with missing parts dropped
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub external_user_id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a find-or-create lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckedUser {
    #[serde(flatten)]
    pub user: User,
    pub is_new: bool,
}
