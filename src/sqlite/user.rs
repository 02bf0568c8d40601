use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::error::map_db_error;
use crate::{BlogError, User, UserRepository};

/// Keeps each `IN (...)` list well under `SQLite`'s bind parameter limit.
const MAX_IDS_PER_QUERY: usize = 500;

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
pub(super) struct UserRecord {
    id: i64,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(row: UserRecord) -> Self {
        User {
            id: row.id,
            name: row.name,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn user_exists(&self, name: &str) -> Result<bool, BlogError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE name = ?)")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("user_exists", "User", e))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, BlogError> {
        let row: Option<UserRecord> = sqlx::query_as(
            "SELECT id, name, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("find_user_by_id", "User", e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, BlogError> {
        let row: Option<UserRecord> = sqlx::query_as(
            "SELECT id, name, password_hash, created_at FROM users WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("find_user_by_name", "User", e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, ids), fields(count = ids.len()), err))]
    async fn find_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, BlogError> {
        let mut users = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
                "SELECT id, name, password_hash, created_at FROM users WHERE id IN (",
            );
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let rows: Vec<UserRecord> = builder
                .build_query_as()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_db_error("find_users_by_ids", "User", e))?;
            users.extend(rows.into_iter().map(User::from));
        }

        Ok(users)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, password_hash), err))]
    async fn create_user(&self, name: &str, password_hash: &str) -> Result<User, BlogError> {
        let row: UserRecord = sqlx::query_as(
            "INSERT INTO users (name, password_hash, created_at) VALUES (?, ?, ?) RETURNING id, name, password_hash, created_at",
        )
        .bind(name)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("create_user", "Username", e))?;

        Ok(row.into())
    }
}
