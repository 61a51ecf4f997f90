//! Cache module - the local timeline cache and the subscriber that keeps it in sync.

mod cache_model;
mod cache_synchronizer;
mod cache_traits;


pub use cache_model::{CachedStatus, StatusFlag};
pub use cache_synchronizer::CacheSynchronizer;
pub use cache_traits::TimelineCacheRepositoryTrait;
