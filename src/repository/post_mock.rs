#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::BlogError;

use super::post::{Post, PostRepository};
use super::user_mock::MockUserRepository;

/// In-memory posts. Shares the user list with a [`MockUserRepository`] so
/// the author reference can be checked on insert.
#[derive(Clone)]
pub struct MockPostRepository {
    pub posts: Arc<Mutex<Vec<Post>>>,
    users: MockUserRepository,
    next_id: Arc<AtomicI64>,
}

impl MockPostRepository {
    pub fn new(users: MockUserRepository) -> Self {
        Self {
            posts: Arc::new(Mutex::new(vec![])),
            users,
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl PostRepository for MockPostRepository {
    async fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, BlogError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, BlogError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }

    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, BlogError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }

    async fn insert_post(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<Post, BlogError> {
        let author_exists = self
            .users
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.id == author_id);
        if !author_exists {
            return Err(BlogError::ForeignKeyViolation);
        }

        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: title.to_owned(),
            content: content.to_owned(),
            author_id,
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }
}
