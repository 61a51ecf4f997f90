use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info};
use std::sync::Arc;

use fedisync_core::accounts::{
    Account, AccountRepositoryTrait, ActiveAccountResolver, NewAccount,
};
use fedisync_core::Result;

use super::model::AccountDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;

/// Repository for managing signed-in accounts in the database
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

impl ActiveAccountResolver for AccountRepository {
    fn active_account_id(&self) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;

        let active_id = accounts
            .select(id)
            .filter(is_active.eq(true))
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(active_id)
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn upsert(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let account_db: AccountDB = new_account.into();

                let stored = diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .on_conflict(id)
                    .do_update()
                    .set((
                        instance.eq(&account_db.instance),
                        username.eq(&account_db.username),
                        display_name.eq(&account_db.display_name),
                        updated_at.eq(account_db.updated_at),
                    ))
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                debug!("Upserted account {}", stored.id);
                Ok(stored.into())
            })
            .await
    }

    async fn set_active(&self, account_id: &str) -> Result<Account> {
        let account_id_owned = account_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                // Fails with NotFound before anything is deactivated
                accounts
                    .find(&account_id_owned)
                    .select(id)
                    .first::<String>(conn)
                    .map_err(StorageError::from)?;

                diesel::update(accounts.filter(is_active.eq(true)))
                    .set(is_active.eq(false))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let activated = diesel::update(accounts.find(&account_id_owned))
                    .set((
                        is_active.eq(true),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                info!("Active account is now {}", activated.id);
                Ok(activated.into())
            })
            .await
    }

    async fn clear_active(&self) -> Result<()> {
        self.writer
            .exec(|conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(accounts.filter(is_active.eq(true)))
                    .set(is_active.eq(false))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                info!("Signed out of all accounts");
                Ok(())
            })
            .await
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let id_to_delete_owned = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected_rows = diesel::delete(accounts.find(id_to_delete_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected_rows)
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(account.into())
    }

    fn get_active(&self) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts
            .select(AccountDB::as_select())
            .filter(is_active.eq(true))
            .first::<AccountDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(account.map(Account::from))
    }

    fn list(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let results = accounts
            .select(AccountDB::as_select())
            .order((is_active.desc(), instance.asc(), username.asc()))
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Account::from).collect())
    }
}
