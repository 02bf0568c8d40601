use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::error::map_db_error;
use crate::{BlogError, Post, PostRepository};

#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRecord {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRecord> for Post {
    fn from(row: PostRecord) -> Self {
        Post {
            id: row.id,
            title: row.title,
            content: row.content,
            author_id: row.author_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, BlogError> {
        let row: Option<PostRecord> = sqlx::query_as(
            "SELECT id, title, content, author_id, created_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("find_post_by_id", "Post", e))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_posts(&self) -> Result<Vec<Post>, BlogError> {
        let rows: Vec<PostRecord> = sqlx::query_as(
            "SELECT id, title, content, author_id, created_at FROM posts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("list_posts", "Post", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, BlogError> {
        let rows: Vec<PostRecord> = sqlx::query_as(
            "SELECT id, title, content, author_id, created_at FROM posts WHERE author_id = ? ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("list_posts_by_author", "Post", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, title, content), err))]
    async fn insert_post(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<Post, BlogError> {
        let row: PostRecord = sqlx::query_as(
            r"INSERT INTO posts (title, content, author_id, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING id, title, content, author_id, created_at",
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("insert_post", "Post", e))?;

        Ok(row.into())
    }
}
