//! Actions module - user intents forwarded to the server and announced as events.

mod actions_model;
mod actions_service;
mod actions_traits;

#[cfg(test)]
pub(crate) mod actions_service_tests;

pub use actions_model::{MuteDuration, Poll, PollOption, Relationship, Status};
pub use actions_service::ActionService;
pub use actions_traits::{ActionServiceTrait, MastodonApiTrait};
