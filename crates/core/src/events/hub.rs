//! In-process fan-out hub for domain events.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;

use super::{DomainEvent, DomainEventSink};

/// Multi-subscriber fan-out of [`DomainEvent`]s.
///
/// Every subscriber receives every event published after it subscribed, in
/// publish order; there is no replay of earlier events. Each subscriber has its
/// own unbounded queue, so a slow subscriber never loses events and never
/// blocks publishers. Cloning the hub yields another handle to the same
/// subscriber list.
#[derive(Clone, Debug, Default)]
pub struct EventHub {
    subscribers: Arc<Mutex<Vec<UnboundedSender<DomainEvent>>>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Never blocks. Subscriptions that were dropped are pruned here; with no
    /// subscribers the event is discarded.
    pub fn publish(&self, event: DomainEvent) {
        self.lock_subscribers()
            .retain(|sender| sender.send(event.clone()).is_ok());
    }

    /// Starts a new subscription at the current position of the hub.
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock_subscribers().push(sender);
        EventSubscription { receiver }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock_subscribers();
        subscribers.retain(|sender| !sender.is_closed());
        subscribers.len()
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<UnboundedSender<DomainEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DomainEventSink for EventHub {
    fn emit(&self, event: DomainEvent) {
        self.publish(event);
    }
}

/// One subscriber's view of the hub.
#[derive(Debug)]
pub struct EventSubscription {
    receiver: UnboundedReceiver<DomainEvent>,
}

impl EventSubscription {
    /// Waits for the next event.
    ///
    /// Returns `None` once every hub handle has been dropped and all queued
    /// events were delivered.
    pub async fn recv(&mut self) -> Option<DomainEvent> {
        self.receiver.recv().await
    }

    /// Converts the subscription into a stream of events.
    pub fn into_stream(self) -> impl Stream<Item = DomainEvent> {
        UnboundedReceiverStream::new(self.receiver)
    }
}
