//! Local user table keyed by identity-provider id
//!
//! Stored as a single `<data_dir>/users.json` map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::services::storage::{read_json, update_json};
use crate::types::{CheckedUser, IdentityProfile, Result, User};

pub struct JsonUserStore {
    path: PathBuf,
}

impl JsonUserStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("users.json"),
        }
    }

    /// Look up a user by provider id
    pub fn find(&self, external_id: &str) -> Result<Option<User>> {
        Ok(self.load()?.remove(external_id))
    }

    /// Find the local user for the signed-in caller, creating it on first sight.
    ///
    /// Returns `None` when nobody is signed in.
    pub fn check_user(&self, profile: Option<&IdentityProfile>) -> Result<Option<CheckedUser>> {
        let Some(profile) = profile else {
            return Ok(None);
        };

        if let Some(existing) = self.find(&profile.external_id)? {
            return Ok(Some(CheckedUser {
                user: existing,
                is_new: false,
            }));
        }

        // Re-check under the write lock: another process may have created it
        let checked = update_json(&self.path, |users: Option<BTreeMap<String, User>>| {
            let mut users = users.unwrap_or_default();
            if let Some(existing) = users.get(&profile.external_id) {
                let checked = CheckedUser {
                    user: existing.clone(),
                    is_new: false,
                };
                return Ok((users, checked));
            }

            let user = User {
                id: Uuid::new_v4().to_string(),
                external_user_id: profile.external_id.clone(),
                name: profile.display_name(),
                image_url: profile.image_url.clone(),
                email: profile.email_addresses.first().cloned(),
                created_at: Utc::now(),
            };
            users.insert(user.external_user_id.clone(), user.clone());
            Ok((users, CheckedUser { user, is_new: true }))
        })?;

        if checked.is_new {
            tracing::info!(
                external_id = %checked.user.external_user_id,
                user_id = %checked.user.id,
                "user created"
            );
        }
        Ok(Some(checked))
    }

    fn load(&self) -> Result<BTreeMap<String, User>> {
        Ok(read_json::<BTreeMap<String, User>>(&self.path)?.unwrap_or_default())
    }
}
