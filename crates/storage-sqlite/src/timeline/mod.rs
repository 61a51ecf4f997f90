//! SQLite storage implementation for the cached timeline.

mod model;
mod repository;

pub use model::CachedStatusDB;
pub use repository::TimelineCacheRepository;
