use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use fedisync_core::cache::{CachedStatus, StatusFlag, TimelineCacheRepositoryTrait};
use fedisync_core::Result;

use super::model::CachedStatusDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::timeline_statuses;
use crate::schema::timeline_statuses::dsl::*;

/// Timeline cache backed by the `timeline_statuses` table.
///
/// Every mutation is a single statement filtered on the owning account, run
/// through the writer actor.
pub struct TimelineCacheRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TimelineCacheRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TimelineCacheRepository { pool, writer }
    }
}

#[async_trait]
impl TimelineCacheRepositoryTrait for TimelineCacheRepository {
    async fn set_flag(
        &self,
        owner: &str,
        target_status_id: &str,
        flag: StatusFlag,
        value: bool,
    ) -> Result<usize> {
        let owner = owner.to_string();
        let target_status_id = target_status_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let row = timeline_statuses
                    .filter(owner_account_id.eq(&owner))
                    .filter(status_id.eq(&target_status_id));

                let affected = match flag {
                    StatusFlag::Reblogged => {
                        diesel::update(row).set(reblogged.eq(value)).execute(conn)
                    }
                    StatusFlag::Favourited => {
                        diesel::update(row).set(favourited.eq(value)).execute(conn)
                    }
                    StatusFlag::Bookmarked => {
                        diesel::update(row).set(bookmarked.eq(value)).execute(conn)
                    }
                    StatusFlag::Pinned => diesel::update(row).set(pinned.eq(value)).execute(conn),
                    StatusFlag::Muted => diesel::update(row).set(muted.eq(value)).execute(conn),
                }
                .map_err(StorageError::from)?;

                Ok(affected)
            })
            .await
    }

    async fn set_poll(
        &self,
        owner: &str,
        target_status_id: &str,
        serialized_poll: String,
    ) -> Result<usize> {
        let owner = owner.to_string();
        let target_status_id = target_status_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    timeline_statuses
                        .filter(owner_account_id.eq(&owner))
                        .filter(status_id.eq(&target_status_id)),
                )
                .set(poll.eq(Some(serialized_poll)))
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_status(&self, owner: &str, target_status_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let target_status_id = target_status_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    timeline_statuses
                        .filter(owner_account_id.eq(&owner))
                        .filter(status_id.eq(&target_status_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_all_by_author(&self, owner: &str, author: &str) -> Result<usize> {
        let owner = owner.to_string();
        let author = author.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    timeline_statuses
                        .filter(owner_account_id.eq(&owner))
                        .filter(author_account_id.eq(&author)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn upsert_statuses(&self, statuses: Vec<CachedStatus>) -> Result<usize> {
        if statuses.is_empty() {
            return Ok(0);
        }

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected_rows = 0;
                for status in statuses {
                    let status_db: CachedStatusDB = status.into();
                    affected_rows += diesel::insert_into(timeline_statuses::table)
                        .values(&status_db)
                        .on_conflict((owner_account_id, status_id))
                        .do_update()
                        .set(&status_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected_rows)
            })
            .await
    }

    fn get_status(&self, owner: &str, target_status_id: &str) -> Result<Option<CachedStatus>> {
        let mut conn = get_connection(&self.pool)?;

        let row = timeline_statuses
            .filter(owner_account_id.eq(owner))
            .filter(status_id.eq(target_status_id))
            .select(CachedStatusDB::as_select())
            .first::<CachedStatusDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(CachedStatus::from))
    }

    fn list_statuses(&self, owner: &str) -> Result<Vec<CachedStatus>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = timeline_statuses
            .filter(owner_account_id.eq(owner))
            .select(CachedStatusDB::as_select())
            .order((created_at.desc(), status_id.desc()))
            .load::<CachedStatusDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(CachedStatus::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountRepository;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use fedisync_core::accounts::{AccountRepositoryTrait, NewAccount};
    use fedisync_core::errors::{DatabaseError, Error};
    use tempfile::tempdir;

    async fn setup() -> (TimelineCacheRepository, AccountRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let accounts = AccountRepository::new(Arc::clone(&pool), writer.clone());
        for account_id in ["me", "alt"] {
            accounts
                .upsert(NewAccount {
                    id: account_id.to_string(),
                    instance: "example.social".to_string(),
                    username: account_id.to_string(),
                    display_name: None,
                })
                .await
                .expect("Failed to create test account");
        }

        (TimelineCacheRepository::new(pool, writer), accounts, temp_dir)
    }

    fn row(owner: &str, id_value: &str, author: &str, minute: u32) -> CachedStatus {
        CachedStatus {
            owner_account_id: owner.to_string(),
            status_id: id_value.to_string(),
            author_account_id: author.to_string(),
            content: format!("<p>{}</p>", id_value),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, minute, 0)
                .unwrap(),
            reblogged: false,
            favourited: false,
            bookmarked: false,
            pinned: false,
            muted: false,
            poll: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_read_back() {
        let (repo, _accounts, _dir) = setup().await;

        let inserted = repo
            .upsert_statuses(vec![row("me", "1", "alice", 0), row("me", "2", "bob", 5)])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let mut refreshed = row("me", "1", "alice", 0);
        refreshed.content = "<p>edited</p>".to_string();
        repo.upsert_statuses(vec![refreshed.clone()]).await.unwrap();

        assert_eq!(repo.get_status("me", "1").unwrap(), Some(refreshed));
        let listed: Vec<String> = repo
            .list_statuses("me")
            .unwrap()
            .into_iter()
            .map(|s| s.status_id)
            .collect();
        assert_eq!(listed, vec!["2", "1"]);
        assert!(repo.list_statuses("alt").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_flag_updates_only_owner_row() {
        let (repo, _accounts, _dir) = setup().await;
        repo.upsert_statuses(vec![row("me", "1", "alice", 0), row("alt", "1", "alice", 0)])
            .await
            .unwrap();

        for flag in [
            StatusFlag::Reblogged,
            StatusFlag::Favourited,
            StatusFlag::Bookmarked,
            StatusFlag::Pinned,
            StatusFlag::Muted,
        ] {
            assert_eq!(repo.set_flag("me", "1", flag, true).await.unwrap(), 1);
            assert!(repo.get_status("me", "1").unwrap().unwrap().flag(flag));
            assert!(!repo.get_status("alt", "1").unwrap().unwrap().flag(flag));
        }

        // Idempotent
        assert_eq!(
            repo.set_flag("me", "1", StatusFlag::Pinned, true)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            repo.set_flag("me", "missing", StatusFlag::Pinned, true)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_set_poll_overwrites_serialized_poll() {
        let (repo, _accounts, _dir) = setup().await;
        repo.upsert_statuses(vec![row("me", "1", "alice", 0)])
            .await
            .unwrap();

        let affected = repo
            .set_poll("me", "1", r#"{"id":"p1","voted":true}"#.to_string())
            .await
            .unwrap();

        assert_eq!(affected, 1);
        let poll_value = repo.get_status("me", "1").unwrap().unwrap().poll;
        assert_eq!(poll_value.as_deref(), Some(r#"{"id":"p1","voted":true}"#));
    }

    #[tokio::test]
    async fn test_deletes_are_scoped_to_owner() {
        let (repo, _accounts, _dir) = setup().await;
        repo.upsert_statuses(vec![
            row("me", "1", "alice", 0),
            row("me", "2", "alice", 1),
            row("me", "3", "bob", 2),
            row("alt", "4", "alice", 3),
        ])
        .await
        .unwrap();

        assert_eq!(repo.delete_status("me", "3").await.unwrap(), 1);
        assert_eq!(repo.delete_status("me", "3").await.unwrap(), 0);
        assert_eq!(repo.delete_all_by_author("me", "alice").await.unwrap(), 2);

        assert!(repo.list_statuses("me").unwrap().is_empty());
        assert_eq!(repo.list_statuses("alt").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rows_require_known_owner_and_cascade_on_account_delete() {
        let (repo, accounts, _dir) = setup().await;

        let orphan = repo
            .upsert_statuses(vec![row("nobody", "1", "alice", 0)])
            .await;
        assert!(matches!(
            orphan,
            Err(Error::StorageFailure(DatabaseError::ForeignKeyViolation(_)))
        ));

        repo.upsert_statuses(vec![row("alt", "1", "alice", 0)])
            .await
            .unwrap();
        accounts.delete("alt").await.unwrap();
        assert!(repo.get_status("alt", "1").unwrap().is_none());
    }
}
