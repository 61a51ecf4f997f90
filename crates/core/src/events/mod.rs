//! Domain events module.
//!
//! Provides the domain event type, the sink trait producers emit through, and
//! the in-process [`EventHub`] that fans events out to every subscriber.

mod domain_event;
mod hub;
mod sink;

pub use domain_event::*;
pub use hub::{EventHub, EventSubscription};
pub use sink::*;
