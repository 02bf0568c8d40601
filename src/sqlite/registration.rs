use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::error::map_db_error;
use super::session::SessionRow;
use super::user::UserRecord;
use crate::{BlogError, RegistrationRepository, SessionRecord, User};

#[derive(Clone)]
pub struct SqliteRegistrationRepository {
    pool: SqlitePool,
}

impl SqliteRegistrationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepository {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, password_hash, token_hash), err)
    )]
    async fn register(
        &self,
        name: &str,
        password_hash: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(User, SessionRecord), BlogError> {
        let now = Utc::now();

        // rolled back on drop unless committed below
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("register", "User", e))?;

        let user: UserRecord = sqlx::query_as(
            "INSERT INTO users (name, password_hash, created_at) VALUES (?, ?, ?) RETURNING id, name, password_hash, created_at",
        )
        .bind(name)
        .bind(password_hash)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error("register", "Username", e))?;
        let user = User::from(user);

        let session: SessionRow = sqlx::query_as(
            r"INSERT INTO sessions (token_hash, user_id, expires_at, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING token_hash, user_id, expires_at, created_at",
        )
        .bind(token_hash)
        .bind(user.id)
        .bind(expires_at)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error("register", "Session", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("register", "User", e))?;

        Ok((user, session.into()))
    }
}
