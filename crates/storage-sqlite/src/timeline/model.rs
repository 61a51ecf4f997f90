//! Database models for cached timeline statuses.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fedisync_core::cache::CachedStatus;

/// Database model for a cached timeline row
#[derive(Queryable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::timeline_statuses)]
#[diesel(primary_key(owner_account_id, status_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CachedStatusDB {
    pub owner_account_id: String,
    pub status_id: String,
    pub author_account_id: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub reblogged: bool,
    pub favourited: bool,
    pub bookmarked: bool,
    pub pinned: bool,
    pub muted: bool,
    pub poll: Option<String>,
}

impl From<CachedStatusDB> for CachedStatus {
    fn from(db: CachedStatusDB) -> Self {
        Self {
            owner_account_id: db.owner_account_id,
            status_id: db.status_id,
            author_account_id: db.author_account_id,
            content: db.content,
            created_at: db.created_at,
            reblogged: db.reblogged,
            favourited: db.favourited,
            bookmarked: db.bookmarked,
            pinned: db.pinned,
            muted: db.muted,
            poll: db.poll,
        }
    }
}

impl From<CachedStatus> for CachedStatusDB {
    fn from(domain: CachedStatus) -> Self {
        Self {
            owner_account_id: domain.owner_account_id,
            status_id: domain.status_id,
            author_account_id: domain.author_account_id,
            content: domain.content,
            created_at: domain.created_at,
            reblogged: domain.reblogged,
            favourited: domain.favourited,
            bookmarked: domain.bookmarked,
            pinned: domain.pinned,
            muted: domain.muted,
            poll: domain.poll,
        }
    }
}
