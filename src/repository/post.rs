use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Author;
use crate::BlogError;

/// A stored post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A post with its author resolved, as returned by read queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Author,
}

impl PostView {
    pub fn new(post: Post, author: Author) -> Self {
        PostView {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
        }
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, BlogError>;
    /// All posts, ordered by id.
    async fn list_posts(&self) -> Result<Vec<Post>, BlogError>;
    /// Posts by one author, ordered by id.
    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, BlogError>;
    /// Fails with `BlogError::ForeignKeyViolation` if `author_id` is unknown.
    async fn insert_post(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<Post, BlogError>;
}
