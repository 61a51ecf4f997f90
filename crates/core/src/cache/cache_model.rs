//! Cached timeline row models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::{Poll, Status};
use crate::errors::Result;

/// Boolean attributes of a cached status that actions toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFlag {
    Reblogged,
    Favourited,
    Bookmarked,
    Pinned,
    Muted,
}

impl StatusFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFlag::Reblogged => "reblogged",
            StatusFlag::Favourited => "favourited",
            StatusFlag::Bookmarked => "bookmarked",
            StatusFlag::Pinned => "pinned",
            StatusFlag::Muted => "muted",
        }
    }
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status as persisted in the local timeline cache.
///
/// Rows are keyed by `(owner_account_id, status_id)`: the same remote status
/// is cached separately for every signed-in account that fetched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedStatus {
    pub owner_account_id: String,
    pub status_id: String,
    pub author_account_id: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub reblogged: bool,
    pub favourited: bool,
    pub bookmarked: bool,
    pub pinned: bool,
    pub muted: bool,
    /// Poll serialized as JSON
    pub poll: Option<String>,
}

impl CachedStatus {
    /// Projects a fetched status into a cache row owned by `owner_account_id`.
    pub fn from_status(owner_account_id: &str, status: &Status) -> Result<Self> {
        let poll = status.poll.as_ref().map(serialize_poll).transpose()?;
        Ok(Self {
            owner_account_id: owner_account_id.to_string(),
            status_id: status.id.clone(),
            author_account_id: status.author_account_id.clone(),
            content: status.content.clone(),
            created_at: status.created_at.naive_utc(),
            reblogged: status.reblogged,
            favourited: status.favourited,
            bookmarked: status.bookmarked,
            pinned: status.pinned,
            muted: status.muted,
            poll,
        })
    }

    pub fn flag(&self, flag: StatusFlag) -> bool {
        match flag {
            StatusFlag::Reblogged => self.reblogged,
            StatusFlag::Favourited => self.favourited,
            StatusFlag::Bookmarked => self.bookmarked,
            StatusFlag::Pinned => self.pinned,
            StatusFlag::Muted => self.muted,
        }
    }

    pub fn set_flag(&mut self, flag: StatusFlag, value: bool) {
        match flag {
            StatusFlag::Reblogged => self.reblogged = value,
            StatusFlag::Favourited => self.favourited = value,
            StatusFlag::Bookmarked => self.bookmarked = value,
            StatusFlag::Pinned => self.pinned = value,
            StatusFlag::Muted => self.muted = value,
        }
    }

    /// Deserializes the stored poll, if any.
    pub fn parsed_poll(&self) -> Result<Option<Poll>> {
        Ok(self
            .poll
            .as_deref()
            .map(serde_json::from_str::<Poll>)
            .transpose()?)
    }
}

/// Serializes a poll the way the cache stores it.
pub(crate) fn serialize_poll(poll: &Poll) -> Result<String> {
    Ok(serde_json::to_string(poll)?)
}
