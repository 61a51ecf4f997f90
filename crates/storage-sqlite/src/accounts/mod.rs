//! SQLite storage implementation for signed-in accounts.

mod model;
mod repository;

pub use model::AccountDB;
pub use repository::AccountRepository;
