//! Remote API and action service traits.

use async_trait::async_trait;

use super::actions_model::{MuteDuration, Poll, Relationship, Status};
use crate::errors::Result;

/// Remote operations the action service forwards user intents to.
///
/// One method per server endpoint: turning a state on and turning it off are
/// distinct calls. Failures are reported as [`Error::NetworkFailure`].
///
/// [`Error::NetworkFailure`]: crate::Error::NetworkFailure
#[async_trait]
pub trait MastodonApiTrait: Send + Sync {
    async fn reblog_status(&self, status_id: &str) -> Result<Status>;
    async fn unreblog_status(&self, status_id: &str) -> Result<Status>;

    async fn favourite_status(&self, status_id: &str) -> Result<Status>;
    async fn unfavourite_status(&self, status_id: &str) -> Result<Status>;

    async fn bookmark_status(&self, status_id: &str) -> Result<Status>;
    async fn unbookmark_status(&self, status_id: &str) -> Result<Status>;

    async fn mute_conversation(&self, status_id: &str) -> Result<Status>;
    async fn unmute_conversation(&self, status_id: &str) -> Result<Status>;

    async fn pin_status(&self, status_id: &str) -> Result<Status>;
    async fn unpin_status(&self, status_id: &str) -> Result<Status>;

    /// Deletes a status. The server returns it with its plain-text source.
    async fn delete_status(&self, status_id: &str) -> Result<Status>;

    async fn vote_in_poll(&self, poll_id: &str, choices: &[u32]) -> Result<Poll>;

    async fn mute_account(
        &self,
        account_id: &str,
        notifications: bool,
        duration: MuteDuration,
    ) -> Result<Relationship>;

    async fn block_account(&self, account_id: &str) -> Result<Relationship>;

    async fn unfollow_account(&self, account_id: &str) -> Result<Relationship>;

    async fn authorize_follow_request(&self, account_id: &str) -> Result<Relationship>;
    async fn reject_follow_request(&self, account_id: &str) -> Result<Relationship>;
}

/// User-facing timeline actions.
///
/// Every successful action publishes exactly one domain event before it
/// returns; a failed action publishes nothing. Muting and blocking an account
/// are best effort: failures are logged, not returned.
#[async_trait]
pub trait ActionServiceTrait: Send + Sync {
    async fn reblog(&self, status_id: &str, reblog: bool) -> Result<Status>;

    async fn favourite(&self, status_id: &str, favourite: bool) -> Result<Status>;

    async fn bookmark(&self, status_id: &str, bookmark: bool) -> Result<Status>;

    async fn mute_conversation(&self, status_id: &str, mute: bool) -> Result<Status>;

    /// Pins or unpins a status.
    ///
    /// A server refusal is reported as [`Error::ServerRejected`] carrying the
    /// server's message.
    ///
    /// [`Error::ServerRejected`]: crate::Error::ServerRejected
    async fn pin(&self, status_id: &str, pin: bool) -> Result<Status>;

    async fn delete(&self, status_id: &str) -> Result<Status>;

    /// Votes in the poll attached to `status_id`.
    ///
    /// An empty `choices` list fails with [`Error::InvalidArgument`] before any
    /// remote call is made.
    ///
    /// [`Error::InvalidArgument`]: crate::Error::InvalidArgument
    async fn vote_in_poll(&self, status_id: &str, poll_id: &str, choices: Vec<u32>)
        -> Result<Poll>;

    async fn unfollow(&self, account_id: &str) -> Result<Relationship>;

    async fn accept_follow_request(&self, account_id: &str) -> Result<Relationship>;

    async fn reject_follow_request(&self, account_id: &str) -> Result<Relationship>;

    async fn mute_account(&self, account_id: &str, notifications: bool, duration: MuteDuration);

    async fn block_account(&self, account_id: &str);
}
