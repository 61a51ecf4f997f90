//! Event-driven patching of the local timeline cache.

use futures::FutureExt;
use log::{debug, error, info};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::{self, JoinHandle};

use super::cache_model::{serialize_poll, StatusFlag};
use super::cache_traits::TimelineCacheRepositoryTrait;
use crate::accounts::ActiveAccountResolver;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, EventHub, EventSubscription};

/// Long-lived subscriber that turns domain events into cache mutations.
///
/// Every event is applied to the rows owned by the account that is active at
/// the moment the event is processed. Failures are logged per event and never
/// stop the worker.
pub struct CacheSynchronizer {
    hub: EventHub,
    cache: Arc<dyn TimelineCacheRepositoryTrait>,
    accounts: Arc<dyn ActiveAccountResolver>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CacheSynchronizer {
    pub fn new(
        hub: EventHub,
        cache: Arc<dyn TimelineCacheRepositoryTrait>,
        accounts: Arc<dyn ActiveAccountResolver>,
    ) -> Self {
        Self {
            hub,
            cache,
            accounts,
            worker: Mutex::new(None),
        }
    }

    /// Subscribes to the hub and spawns the worker task.
    ///
    /// Only events published after this call are seen. Returns `false` without
    /// doing anything if the worker is already running. Must be called from
    /// within a Tokio runtime.
    pub fn start(&self) -> bool {
        let mut worker = self.worker_slot();
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("Cache synchronizer already running");
            return false;
        }

        let subscription = self.hub.subscribe();
        let cache = Arc::clone(&self.cache);
        let accounts = Arc::clone(&self.accounts);
        *worker = Some(tokio::spawn(run_worker(subscription, cache, accounts)));
        true
    }

    /// Cancels the worker task and waits for it to finish.
    ///
    /// Events published while stopped are never applied. Safe to call when
    /// not running.
    pub async fn stop(&self) {
        let handle = self.worker_slot().take();
        let Some(handle) = handle else {
            return;
        };

        handle.abort();
        match handle.await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {}
            Err(e) => error!("Cache synchronizer worker failed: {}", e),
        }
        info!("Cache synchronizer stopped");
    }

    pub fn is_running(&self) -> bool {
        self.worker_slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Applies a single event to the cache of the active account.
    ///
    /// This is the same step the worker runs for every received event.
    pub async fn apply_event(&self, event: &DomainEvent) -> Result<()> {
        apply(self.cache.as_ref(), &self.accounts, event).await
    }

    fn worker_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for CacheSynchronizer {
    fn drop(&mut self) {
        if let Some(handle) = self.worker_slot().take() {
            handle.abort();
        }
    }
}

async fn run_worker(
    mut subscription: EventSubscription,
    cache: Arc<dyn TimelineCacheRepositoryTrait>,
    accounts: Arc<dyn ActiveAccountResolver>,
) {
    info!("Cache synchronizer started");

    while let Some(event) = subscription.recv().await {
        let outcome = AssertUnwindSafe(apply(cache.as_ref(), &accounts, &event))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Failed to apply {:?} to cache: {}", event, e),
            Err(_) => error!("Panic while applying {:?} to cache", event),
        }
    }

    info!("Event hub closed, cache synchronizer exiting");
}

/// Resolves the active account on the blocking pool; resolvers may hit storage.
async fn resolve_owner(accounts: &Arc<dyn ActiveAccountResolver>) -> Result<Option<String>> {
    let accounts = Arc::clone(accounts);
    task::spawn_blocking(move || accounts.active_account_id())
        .await
        .map_err(|e| Error::Unexpected(format!("Active account lookup failed: {}", e)))?
}

async fn apply(
    cache: &dyn TimelineCacheRepositoryTrait,
    accounts: &Arc<dyn ActiveAccountResolver>,
    event: &DomainEvent,
) -> Result<()> {
    let Some(owner) = resolve_owner(accounts).await? else {
        debug!("No active account, dropping {:?}", event);
        return Ok(());
    };

    let affected = match event {
        DomainEvent::Reblogged {
            status_id,
            reblogged,
        } => {
            cache
                .set_flag(&owner, status_id, StatusFlag::Reblogged, *reblogged)
                .await?
        }
        DomainEvent::Favourited {
            status_id,
            favourited,
        } => {
            cache
                .set_flag(&owner, status_id, StatusFlag::Favourited, *favourited)
                .await?
        }
        DomainEvent::Bookmarked {
            status_id,
            bookmarked,
        } => {
            cache
                .set_flag(&owner, status_id, StatusFlag::Bookmarked, *bookmarked)
                .await?
        }
        DomainEvent::Pinned { status_id, pinned } => {
            cache
                .set_flag(&owner, status_id, StatusFlag::Pinned, *pinned)
                .await?
        }
        DomainEvent::ConversationMuted { status_id, muted } => {
            cache
                .set_flag(&owner, status_id, StatusFlag::Muted, *muted)
                .await?
        }
        DomainEvent::PollVoted { status_id, poll } => {
            let serialized = serialize_poll(poll)?;
            cache.set_poll(&owner, status_id, serialized).await?
        }
        DomainEvent::Unfollowed { account_id }
        | DomainEvent::AccountMuted { account_id }
        | DomainEvent::AccountBlocked { account_id } => {
            cache.delete_all_by_author(&owner, account_id).await?
        }
        DomainEvent::StatusDeleted { status_id } => {
            cache.delete_status(&owner, status_id).await?
        }
        // Follow requests have no cached projection
        DomainEvent::FollowRequestAnswered { .. } => 0,
    };

    debug!(
        "Applied {:?} for account {} ({} row(s))",
        event, owner, affected
    );
    Ok(())
}
