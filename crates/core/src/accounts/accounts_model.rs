//! Account domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An account the user has signed in with on this device.
///
/// `id` is the local identifier that owns cached timeline rows. At most one
/// account is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    /// Instance domain, e.g. `mastodon.social`
    pub instance: String,
    pub username: String,
    pub display_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// The fully qualified handle, `@username@instance`.
    pub fn full_name(&self) -> String {
        format!("@{}@{}", self.username, self.instance)
    }
}

/// Input model for registering (or refreshing) a signed-in account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub id: String,
    pub instance: String,
    pub username: String,
    pub display_name: Option<String>,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Account id cannot be empty".to_string(),
            ));
        }
        if self.instance.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Account instance cannot be empty".to_string(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Account username cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
