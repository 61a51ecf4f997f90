//! Local timeline cache repository trait.

use async_trait::async_trait;

use super::cache_model::{CachedStatus, StatusFlag};
use crate::errors::Result;

/// Contract for the local timeline cache.
///
/// Every mutation is a single statement scoped to one owner account and is
/// idempotent. Mutations that match no row succeed and report zero affected
/// rows.
#[async_trait]
pub trait TimelineCacheRepositoryTrait: Send + Sync {
    /// Sets one boolean flag on the row `(owner_account_id, status_id)`.
    ///
    /// Returns the number of updated rows.
    async fn set_flag(
        &self,
        owner_account_id: &str,
        status_id: &str,
        flag: StatusFlag,
        value: bool,
    ) -> Result<usize>;

    /// Overwrites the serialized poll on the row `(owner_account_id, status_id)`.
    async fn set_poll(
        &self,
        owner_account_id: &str,
        status_id: &str,
        serialized_poll: String,
    ) -> Result<usize>;

    /// Deletes the row `(owner_account_id, status_id)`.
    async fn delete_status(&self, owner_account_id: &str, status_id: &str) -> Result<usize>;

    /// Deletes every row owned by `owner_account_id` written by `author_account_id`.
    async fn delete_all_by_author(
        &self,
        owner_account_id: &str,
        author_account_id: &str,
    ) -> Result<usize>;

    /// Inserts rows, replacing existing rows with the same key.
    async fn upsert_statuses(&self, statuses: Vec<CachedStatus>) -> Result<usize>;

    fn get_status(&self, owner_account_id: &str, status_id: &str)
        -> Result<Option<CachedStatus>>;

    /// Lists an owner's rows, newest first.
    fn list_statuses(&self, owner_account_id: &str) -> Result<Vec<CachedStatus>>;
}
