//! Accounts module - signed-in accounts and active-account resolution.

mod accounts_model;
mod accounts_traits;
mod active_account;


// Re-export the public interface
pub use accounts_model::{Account, NewAccount};
pub use accounts_traits::{AccountRepositoryTrait, ActiveAccountResolver};
pub use active_account::ActiveAccountHandle;
