//! Server-side entities returned by timeline actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A status as the server represents it after an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    /// Account that authored the status
    pub author_account_id: String,
    pub content: String,
    /// Plain-text source, only returned when deleting a status
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reblogged: bool,
    pub favourited: bool,
    pub bookmarked: bool,
    pub pinned: bool,
    pub muted: bool,
    pub poll: Option<Poll>,
}

/// A poll attached to a status.
///
/// Serialized in the Mastodon wire shape, which is also how the local cache
/// stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub votes_count: i64,
    #[serde(default)]
    pub voters_count: Option<i64>,
    #[serde(default)]
    pub options: Vec<PollOption>,
    #[serde(default)]
    pub voted: bool,
    #[serde(default)]
    pub own_votes: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub title: String,
    /// `None` while results are hidden until the poll ends
    #[serde(default)]
    pub votes_count: Option<i64>,
}

/// Relationship between the signed-in user and another account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    #[serde(default)]
    pub following: bool,
    #[serde(default)]
    pub followed_by: bool,
    #[serde(default)]
    pub blocking: bool,
    #[serde(default)]
    pub muting: bool,
    #[serde(default)]
    pub muting_notifications: bool,
    #[serde(default)]
    pub requested: bool,
}

/// How long an account mute lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MuteDuration {
    #[default]
    Indefinite,
    Seconds(u64),
}

impl MuteDuration {
    /// The value of the API's `duration` parameter (0 means indefinite).
    pub fn as_secs(&self) -> u64 {
        match self {
            MuteDuration::Indefinite => 0,
            MuteDuration::Seconds(secs) => *secs,
        }
    }
}
