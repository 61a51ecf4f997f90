//! Where the action service sends the events it produces.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receiver of events announcing confirmed remote changes.
///
/// [`EventHub`](super::EventHub) is the production implementation. `emit`
/// runs on the caller's task right after the remote call returned, so it must
/// not block or perform I/O.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Records emitted events for assertions.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.recorded().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded().is_empty()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<DomainEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.recorded().push(event);
    }
}
