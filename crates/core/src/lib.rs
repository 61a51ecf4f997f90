//! Fedisync Core - domain events, timeline actions, and cache synchronization.
//!
//! This crate contains the mechanism that keeps a client's locally cached
//! timeline consistent with actions the user performs against a
//! Mastodon-compatible server. It is database- and HTTP-agnostic: storage is
//! implemented by `fedisync-storage-sqlite`, the remote API by `fedisync-client`.
//!
//! ```text
//! ActionService ──remote call──▶ MastodonApiTrait
//!       │ (on success)
//!       ▼
//!    EventHub ──fan-out──▶ CacheSynchronizer ──▶ TimelineCacheRepositoryTrait
//!                     └──▶ other subscribers
//! ```

pub mod accounts;
pub mod actions;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod events;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
