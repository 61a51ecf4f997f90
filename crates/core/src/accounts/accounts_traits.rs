//! Account repository and active-account resolver traits.

use async_trait::async_trait;

use super::accounts_model::{Account, NewAccount};
use crate::errors::Result;

/// Resolves the currently signed-in account.
///
/// Consulted afresh for every event the cache synchronizer processes, since
/// the active account can change at any time during the process lifetime.
pub trait ActiveAccountResolver: Send + Sync {
    /// Returns the id of the active account, or `None` when nobody is signed in.
    fn active_account_id(&self) -> Result<Option<String>>;
}

/// Trait defining the contract for account persistence.
#[async_trait]
pub trait AccountRepositoryTrait: ActiveAccountResolver {
    /// Inserts the account, or refreshes its profile fields if it already exists.
    async fn upsert(&self, new_account: NewAccount) -> Result<Account>;

    /// Makes `account_id` the only active account.
    async fn set_active(&self, account_id: &str) -> Result<Account>;

    /// Marks every account inactive.
    async fn clear_active(&self) -> Result<()>;

    /// Deletes an account and, through the schema, its cached timeline rows.
    ///
    /// Returns the number of deleted accounts.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    fn get_active(&self) -> Result<Option<Account>>;

    fn list(&self) -> Result<Vec<Account>>;
}
