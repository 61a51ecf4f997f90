use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::actions_model::{MuteDuration, Poll, Relationship, Status};
use super::actions_traits::{ActionServiceTrait, MastodonApiTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

/// Forwards user intents to the server and announces confirmed changes.
///
/// The service never touches the local cache itself: the cache is patched by
/// whoever subscribes to the events emitted here.
pub struct ActionService {
    api: Arc<dyn MastodonApiTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ActionService {
    pub fn new(api: Arc<dyn MastodonApiTrait>, event_sink: Arc<dyn DomainEventSink>) -> Self {
        Self { api, event_sink }
    }

    /// Emits `event` if the remote call succeeded, then hands the result back.
    fn publish_on_success<T>(
        &self,
        result: Result<T>,
        event: impl FnOnce() -> DomainEvent,
    ) -> Result<T> {
        if result.is_ok() {
            let event = event();
            debug!("Publishing {:?}", event);
            self.event_sink.emit(event);
        }
        result
    }
}

#[async_trait]
impl ActionServiceTrait for ActionService {
    async fn reblog(&self, status_id: &str, reblog: bool) -> Result<Status> {
        let result = if reblog {
            self.api.reblog_status(status_id).await
        } else {
            self.api.unreblog_status(status_id).await
        };
        self.publish_on_success(result, || DomainEvent::reblogged(status_id, reblog))
    }

    async fn favourite(&self, status_id: &str, favourite: bool) -> Result<Status> {
        let result = if favourite {
            self.api.favourite_status(status_id).await
        } else {
            self.api.unfavourite_status(status_id).await
        };
        self.publish_on_success(result, || DomainEvent::favourited(status_id, favourite))
    }

    async fn bookmark(&self, status_id: &str, bookmark: bool) -> Result<Status> {
        let result = if bookmark {
            self.api.bookmark_status(status_id).await
        } else {
            self.api.unbookmark_status(status_id).await
        };
        self.publish_on_success(result, || DomainEvent::bookmarked(status_id, bookmark))
    }

    async fn mute_conversation(&self, status_id: &str, mute: bool) -> Result<Status> {
        let result = if mute {
            self.api.mute_conversation(status_id).await
        } else {
            self.api.unmute_conversation(status_id).await
        };
        self.publish_on_success(result, || DomainEvent::conversation_muted(status_id, mute))
    }

    async fn pin(&self, status_id: &str, pin: bool) -> Result<Status> {
        let result = if pin {
            self.api.pin_status(status_id).await
        } else {
            self.api.unpin_status(status_id).await
        };
        // Only an actual server response is reported as a rejection
        let result = result.map_err(|e| match e {
            Error::NetworkFailure(network) if network.status.is_some() => {
                let verb = if pin { "pin" } else { "unpin" };
                warn!("Server refused to {} status {}: {}", verb, status_id, network);
                Error::ServerRejected(network.server_message().unwrap_or(network.message))
            }
            other => other,
        });
        self.publish_on_success(result, || DomainEvent::pinned(status_id, pin))
    }

    async fn delete(&self, status_id: &str) -> Result<Status> {
        let result = self.api.delete_status(status_id).await;
        self.publish_on_success(result, || DomainEvent::status_deleted(status_id))
    }

    async fn vote_in_poll(
        &self,
        status_id: &str,
        poll_id: &str,
        choices: Vec<u32>,
    ) -> Result<Poll> {
        if choices.is_empty() {
            return Err(Error::InvalidArgument(
                "Cannot vote in a poll without choices".to_string(),
            ));
        }

        let poll = self.api.vote_in_poll(poll_id, &choices).await?;
        debug!("Publishing poll vote for status {}", status_id);
        self.event_sink
            .emit(DomainEvent::poll_voted(status_id, poll.clone()));
        Ok(poll)
    }

    async fn unfollow(&self, account_id: &str) -> Result<Relationship> {
        let result = self.api.unfollow_account(account_id).await;
        self.publish_on_success(result, || DomainEvent::unfollowed(account_id))
    }

    async fn accept_follow_request(&self, account_id: &str) -> Result<Relationship> {
        let result = self.api.authorize_follow_request(account_id).await;
        self.publish_on_success(result, || {
            DomainEvent::follow_request_answered(account_id, true)
        })
    }

    async fn reject_follow_request(&self, account_id: &str) -> Result<Relationship> {
        let result = self.api.reject_follow_request(account_id).await;
        self.publish_on_success(result, || {
            DomainEvent::follow_request_answered(account_id, false)
        })
    }

    async fn mute_account(&self, account_id: &str, notifications: bool, duration: MuteDuration) {
        match self
            .api
            .mute_account(account_id, notifications, duration)
            .await
        {
            Ok(_) => self.event_sink.emit(DomainEvent::account_muted(account_id)),
            Err(e) => warn!("Failed to mute account {}: {}", account_id, e),
        }
    }

    async fn block_account(&self, account_id: &str) {
        match self.api.block_account(account_id).await {
            Ok(_) => self
                .event_sink
                .emit(DomainEvent::account_blocked(account_id)),
            Err(e) => warn!("Failed to block account {}: {}", account_id, e),
        }
    }
}
