//! Embedded database migrations for `SQLite`.
//!
//! Migration files are compiled into the binary and applied in order, each
//! at most once, with applied names recorded in `_quill_migrations`.
//!
//! # Example
//!
//! ```rust,ignore
//! use quill::sqlite::migrations;
//! use sqlx::SqlitePool;
//!
//! async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
//!     migrations::run(pool).await?;
//!     Ok(())
//! }
//! ```

use sqlx::{Executor, SqlitePool};

const CORE_MIGRATIONS: &[(&str, &str)] = &[
    (
        "20260301000001_create_users_table",
        include_str!("../../migrations_sqlite/core/20260301000001_create_users_table.sql"),
    ),
    (
        "20260301000002_create_posts_table",
        include_str!("../../migrations_sqlite/core/20260301000002_create_posts_table.sql"),
    ),
    (
        "20260301000003_create_sessions_table",
        include_str!("../../migrations_sqlite/core/20260301000003_create_sessions_table.sql"),
    ),
];

/// Applies every pending migration.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _quill_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    for (name, sql) in CORE_MIGRATIONS {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _quill_migrations WHERE name = ?)")
                .bind(*name)
                .fetch_one(pool)
                .await?;

        if applied {
            continue;
        }

        // One transaction per file so a half-applied migration is never
        // recorded. Statements are split on `;`, so migration files must
        // not contain semicolons inside string literals.
        let mut tx = pool.begin().await?;
        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed).execute(&mut *tx).await?;
            }
        }
        sqlx::query("INSERT INTO _quill_migrations (name) VALUES (?)")
            .bind(*name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        log::info!(target: "quill::sqlite", "msg=\"migration applied\", name=\"{name}\"");
    }

    Ok(())
}

/// Names of the migrations this build knows about, in application order.
pub fn known_migrations() -> impl Iterator<Item = &'static str> {
    CORE_MIGRATIONS.iter().map(|(name, _)| *name)
}
