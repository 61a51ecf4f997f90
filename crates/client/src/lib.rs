//! Fedisync Client - Mastodon REST API client for timeline actions.
//!
//! Implements [`fedisync_core::actions::MastodonApiTrait`] over `reqwest`.

pub mod client;

pub use client::{MastodonApiClient, DEFAULT_TIMEOUT};
