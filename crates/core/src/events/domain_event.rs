//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::actions::Poll;

/// Domain events published after a remote action succeeded.
///
/// Each variant carries just enough to locate the affected cache rows and the
/// new state. The set is closed: consumers `match` it exhaustively, so adding a
/// variant forces every consumer to decide how to handle it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    Reblogged {
        status_id: String,
        reblogged: bool,
    },

    Favourited {
        status_id: String,
        favourited: bool,
    },

    Bookmarked {
        status_id: String,
        bookmarked: bool,
    },

    Pinned {
        status_id: String,
        pinned: bool,
    },

    /// Notifications for the conversation containing the status were muted or unmuted.
    ConversationMuted {
        status_id: String,
        muted: bool,
    },

    /// The user voted; `poll` is the server's updated poll.
    PollVoted {
        status_id: String,
        poll: Poll,
    },

    Unfollowed {
        account_id: String,
    },

    AccountMuted {
        account_id: String,
    },

    AccountBlocked {
        account_id: String,
    },

    StatusDeleted {
        status_id: String,
    },

    /// A pending follow request from `account_id` was accepted or rejected.
    FollowRequestAnswered {
        account_id: String,
        accepted: bool,
    },
}

impl DomainEvent {
    pub fn reblogged(status_id: impl Into<String>, reblogged: bool) -> Self {
        Self::Reblogged {
            status_id: status_id.into(),
            reblogged,
        }
    }

    pub fn favourited(status_id: impl Into<String>, favourited: bool) -> Self {
        Self::Favourited {
            status_id: status_id.into(),
            favourited,
        }
    }

    pub fn bookmarked(status_id: impl Into<String>, bookmarked: bool) -> Self {
        Self::Bookmarked {
            status_id: status_id.into(),
            bookmarked,
        }
    }

    pub fn pinned(status_id: impl Into<String>, pinned: bool) -> Self {
        Self::Pinned {
            status_id: status_id.into(),
            pinned,
        }
    }

    pub fn conversation_muted(status_id: impl Into<String>, muted: bool) -> Self {
        Self::ConversationMuted {
            status_id: status_id.into(),
            muted,
        }
    }

    pub fn poll_voted(status_id: impl Into<String>, poll: Poll) -> Self {
        Self::PollVoted {
            status_id: status_id.into(),
            poll,
        }
    }

    pub fn unfollowed(account_id: impl Into<String>) -> Self {
        Self::Unfollowed {
            account_id: account_id.into(),
        }
    }

    pub fn account_muted(account_id: impl Into<String>) -> Self {
        Self::AccountMuted {
            account_id: account_id.into(),
        }
    }

    pub fn account_blocked(account_id: impl Into<String>) -> Self {
        Self::AccountBlocked {
            account_id: account_id.into(),
        }
    }

    pub fn status_deleted(status_id: impl Into<String>) -> Self {
        Self::StatusDeleted {
            status_id: status_id.into(),
        }
    }

    pub fn follow_request_answered(account_id: impl Into<String>, accepted: bool) -> Self {
        Self::FollowRequestAnswered {
            account_id: account_id.into(),
            accepted,
        }
    }

    /// The status this event refers to, for status-scoped variants.
    pub fn status_id(&self) -> Option<&str> {
        match self {
            Self::Reblogged { status_id, .. }
            | Self::Favourited { status_id, .. }
            | Self::Bookmarked { status_id, .. }
            | Self::Pinned { status_id, .. }
            | Self::ConversationMuted { status_id, .. }
            | Self::PollVoted { status_id, .. }
            | Self::StatusDeleted { status_id } => Some(status_id),
            Self::Unfollowed { .. }
            | Self::AccountMuted { .. }
            | Self::AccountBlocked { .. }
            | Self::FollowRequestAnswered { .. } => None,
        }
    }

    /// The account this event refers to, for account-scoped variants.
    pub fn account_id(&self) -> Option<&str> {
        match self {
            Self::Unfollowed { account_id }
            | Self::AccountMuted { account_id }
            | Self::AccountBlocked { account_id }
            | Self::FollowRequestAnswered { account_id, .. } => Some(account_id),
            Self::Reblogged { .. }
            | Self::Favourited { .. }
            | Self::Bookmarked { .. }
            | Self::Pinned { .. }
            | Self::ConversationMuted { .. }
            | Self::PollVoted { .. }
            | Self::StatusDeleted { .. } => None,
        }
    }
}
