//! Line-delimited JSON action commands read from stdin.
//!
//! ```text
//! {"action": "reblog", "status_id": "42"}
//! {"action": "pin", "status_id": "7", "enabled": false}
//! {"action": "vote", "status_id": "9", "poll_id": "3", "choices": [0, 2]}
//! ```

use serde::Deserialize;

use fedisync_core::actions::{ActionServiceTrait, MuteDuration};
use fedisync_core::errors::{Error, Result};

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionCommand {
    Reblog {
        status_id: String,
        #[serde(default = "enabled")]
        enabled: bool,
    },
    Favourite {
        status_id: String,
        #[serde(default = "enabled")]
        enabled: bool,
    },
    Bookmark {
        status_id: String,
        #[serde(default = "enabled")]
        enabled: bool,
    },
    MuteConversation {
        status_id: String,
        #[serde(default = "enabled")]
        enabled: bool,
    },
    Pin {
        status_id: String,
        #[serde(default = "enabled")]
        enabled: bool,
    },
    Delete {
        status_id: String,
    },
    Vote {
        status_id: String,
        poll_id: String,
        choices: Vec<u32>,
    },
    MuteAccount {
        account_id: String,
        #[serde(default = "enabled")]
        notifications: bool,
        /// Seconds; absent or zero mutes indefinitely
        #[serde(default)]
        duration: u64,
    },
    BlockAccount {
        account_id: String,
    },
    Unfollow {
        account_id: String,
    },
    AcceptFollowRequest {
        account_id: String,
    },
    RejectFollowRequest {
        account_id: String,
    },
}

impl ActionCommand {
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line)
            .map_err(|e| Error::InvalidArgument(format!("Unrecognized command: {}", e)))
    }

    /// Runs the command and returns a short summary of the outcome.
    pub async fn execute(self, service: &dyn ActionServiceTrait) -> Result<String> {
        let summary = match self {
            ActionCommand::Reblog { status_id, enabled } => {
                let status = service.reblog(&status_id, enabled).await?;
                format!("status {} reblogged={}", status.id, enabled)
            }
            ActionCommand::Favourite { status_id, enabled } => {
                let status = service.favourite(&status_id, enabled).await?;
                format!("status {} favourited={}", status.id, enabled)
            }
            ActionCommand::Bookmark { status_id, enabled } => {
                let status = service.bookmark(&status_id, enabled).await?;
                format!("status {} bookmarked={}", status.id, enabled)
            }
            ActionCommand::MuteConversation { status_id, enabled } => {
                let status = service.mute_conversation(&status_id, enabled).await?;
                format!("status {} muted={}", status.id, enabled)
            }
            ActionCommand::Pin { status_id, enabled } => {
                let status = service.pin(&status_id, enabled).await?;
                format!("status {} pinned={}", status.id, enabled)
            }
            ActionCommand::Delete { status_id } => {
                service.delete(&status_id).await?;
                format!("status {} deleted", status_id)
            }
            ActionCommand::Vote {
                status_id,
                poll_id,
                choices,
            } => {
                let poll = service.vote_in_poll(&status_id, &poll_id, choices).await?;
                format!("poll {} voted {:?}", poll.id, poll.own_votes)
            }
            ActionCommand::MuteAccount {
                account_id,
                notifications,
                duration,
            } => {
                let duration = match duration {
                    0 => MuteDuration::Indefinite,
                    secs => MuteDuration::Seconds(secs),
                };
                service
                    .mute_account(&account_id, notifications, duration)
                    .await;
                format!("mute requested for account {}", account_id)
            }
            ActionCommand::BlockAccount { account_id } => {
                service.block_account(&account_id).await;
                format!("block requested for account {}", account_id)
            }
            ActionCommand::Unfollow { account_id } => {
                service.unfollow(&account_id).await?;
                format!("unfollowed account {}", account_id)
            }
            ActionCommand::AcceptFollowRequest { account_id } => {
                service.accept_follow_request(&account_id).await?;
                format!("accepted follow request from {}", account_id)
            }
            ActionCommand::RejectFollowRequest { account_id } => {
                service.reject_follow_request(&account_id).await?;
                format!("rejected follow request from {}", account_id)
            }
        };
        Ok(summary)
    }
}
