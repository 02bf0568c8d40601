//! `SQLite` database backend implementations.
//!
//! This module provides `SQLite`-backed implementations for all repository traits.
//! Enable the `sqlx_sqlite` feature to use these implementations.

mod error;
pub mod migrations;
mod post;
mod registration;
mod session;
mod user;

use std::str::FromStr;

pub use post::SqlitePostRepository;
pub use registration::SqliteRegistrationRepository;
pub use session::SqliteSessionRepository;
pub use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
pub use user::SqliteUserRepository;

/// Opens a pool against `url` with foreign keys enforced.
///
/// In-memory databases are per-connection in `SQLite`, so the pool is capped
/// at a single connection for `:memory:` URLs.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .foreign_keys(true)
        .create_if_missing(true);

    let max_connections = if url.contains(":memory:") { 1 } else { 5 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Creates all `SQLite` repository instances from a connection pool.
pub fn create_repositories(
    pool: SqlitePool,
) -> (
    SqliteUserRepository,
    SqliteSessionRepository,
    SqlitePostRepository,
    SqliteRegistrationRepository,
) {
    (
        SqliteUserRepository::new(pool.clone()),
        SqliteSessionRepository::new(pool.clone()),
        SqlitePostRepository::new(pool.clone()),
        SqliteRegistrationRepository::new(pool),
    )
}
