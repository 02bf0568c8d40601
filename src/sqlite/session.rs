use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::error::map_db_error;
use crate::{BlogError, NewSession, SessionRecord, SessionRepository};

#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
pub(super) struct SessionRow {
    token_hash: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        SessionRecord {
            token_hash: row.token_hash,
            user_id: row.user_id,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, session), fields(user_id = session.user_id), err))]
    async fn create_session(&self, session: NewSession) -> Result<SessionRecord, BlogError> {
        let row: SessionRow = sqlx::query_as(
            r"INSERT INTO sessions (token_hash, user_id, expires_at, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING token_hash, user_id, expires_at, created_at",
        )
        .bind(&session.token_hash)
        .bind(session.user_id)
        .bind(session.expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("create_session", "Session", e))?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, BlogError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r"SELECT token_hash, user_id, expires_at, created_at
               FROM sessions WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("find_session", "Session", e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    async fn delete_session(&self, token_hash: &str) -> Result<bool, BlogError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("delete_session", "Session", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token_hash), err))]
    async fn set_expiry(
        &self,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BlogError> {
        let result = sqlx::query("UPDATE sessions SET expires_at = ? WHERE token_hash = ?")
            .bind(expires_at)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("set_expiry", "Session", e))?;

        Ok(result.rows_affected() > 0)
    }
}
