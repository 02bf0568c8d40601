//! Posts with their authors resolved.

use std::collections::{BTreeSet, HashMap};

use crate::{Author, BlogError, Post, PostRepository, PostView, User, UserRepository};

/// Reads and writes posts, joining authors in memory.
#[derive(Clone)]
pub struct ContentRepository<P, U> {
    posts: P,
    users: U,
}

impl<P: PostRepository, U: UserRepository> ContentRepository<P, U> {
    pub fn new(posts: P, users: U) -> Self {
        Self { posts, users }
    }

    /// # Errors
    ///
    /// Returns `BlogError::NotFound` if the post or its author is absent.
    pub async fn fetch_post_by_id(&self, id: i64) -> Result<PostView, BlogError> {
        let post = self
            .posts
            .find_post_by_id(id)
            .await?
            .ok_or(BlogError::NotFound("Post"))?;

        let author = self
            .users
            .find_user_by_id(post.author_id)
            .await?
            .ok_or(BlogError::NotFound("User"))?;

        Ok(PostView::new(post, Author::from(author)))
    }

    /// Every post ordered by id, authors fetched in one bulk lookup.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails.
    pub async fn fetch_all_posts(&self) -> Result<Vec<PostView>, BlogError> {
        let posts = self.posts.list_posts().await?;
        self.resolve_authors(posts).await
    }

    /// Posts by one author, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::NotFound` when the author has no posts.
    pub async fn fetch_posts_by_author(&self, author_id: i64) -> Result<Vec<PostView>, BlogError> {
        let posts = self.posts.list_posts_by_author(author_id).await?;
        if posts.is_empty() {
            return Err(BlogError::NotFound("Posts"));
        }
        self.resolve_authors(posts).await
    }

    /// Stores a post and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::ForeignKeyViolation` if `author_id` is unknown.
    pub async fn insert_post(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<i64, BlogError> {
        self.store_post(title, content, author_id)
            .await
            .map(|post| post.id)
    }

    /// Like [`insert_post`](Self::insert_post) but hands back the stored row.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::ForeignKeyViolation` if `author_id` is unknown.
    pub async fn store_post(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<Post, BlogError> {
        let post = self.posts.insert_post(title, content, author_id).await?;
        log::info!(
            target: "quill::content",
            "msg=\"post created\", post_id={}, author_id={author_id}",
            post.id
        );
        Ok(post)
    }

    /// The public projection of a user, if they exist.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails.
    pub async fn find_author(&self, id: i64) -> Result<Option<Author>, BlogError> {
        Ok(self.users.find_user_by_id(id).await?.map(Author::from))
    }

    async fn resolve_authors(&self, posts: Vec<Post>) -> Result<Vec<PostView>, BlogError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = posts
            .iter()
            .map(|p| p.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let authors: HashMap<i64, User> = self
            .users
            .find_users_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let author = authors
                    .get(&post.author_id)
                    .map(Author::from)
                    .ok_or(BlogError::NotFound("User"))?;
                Ok(PostView::new(post, author))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::{MockPostRepository, MockUserRepository};

    fn content() -> (
        ContentRepository<MockPostRepository, MockUserRepository>,
        MockUserRepository,
    ) {
        let users = MockUserRepository::new();
        users.insert(User::mock(1, "admin"));
        users.insert(User::mock(2, "alice"));
        users.insert(User::mock(3, "bob"));
        let posts = MockPostRepository::new(users.clone());
        (ContentRepository::new(posts, users.clone()), users)
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let (content, _) = content();
        let id = content.insert_post("Hello", "First", 2).await.unwrap();

        let view = content.fetch_post_by_id(id).await.unwrap();
        assert_eq!(view.title, "Hello");
        assert_eq!(
            view.author,
            Author {
                id: 2,
                name: "alice".to_owned()
            }
        );
        assert_eq!(
            content.fetch_post_by_id(999).await.unwrap_err(),
            BlogError::NotFound("Post")
        );
    }

    #[tokio::test]
    async fn test_unknown_author_is_foreign_key_violation() {
        let (content, _) = content();
        assert_eq!(
            content.insert_post("t", "c", 42).await.unwrap_err(),
            BlogError::ForeignKeyViolation
        );
    }

    #[tokio::test]
    async fn test_fetch_all_uses_one_bulk_lookup() {
        let (content, users) = content();
        for author in [2, 3, 2, 1, 3] {
            content.insert_post("t", "c", author).await.unwrap();
        }

        let views = content.fetch_all_posts().await.unwrap();

        assert_eq!(views.len(), 5);
        assert_eq!(
            views.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(views[3].author.name, "admin");
        assert_eq!(users.bulk_lookups(), 1);
        assert_eq!(users.single_lookups(), 0);
    }

    #[tokio::test]
    async fn test_fetch_all_empty() {
        let (content, users) = content();
        assert!(content.fetch_all_posts().await.unwrap().is_empty());
        assert_eq!(users.bulk_lookups(), 0);
    }

    #[tokio::test]
    async fn test_posts_by_author() {
        let (content, _) = content();
        content.insert_post("a", "1", 2).await.unwrap();
        content.insert_post("b", "2", 3).await.unwrap();
        content.insert_post("c", "3", 2).await.unwrap();

        let views = content.fetch_posts_by_author(2).await.unwrap();
        assert_eq!(
            views.iter().map(|v| v.title.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );

        assert_eq!(
            content.fetch_posts_by_author(1).await.unwrap_err(),
            BlogError::NotFound("Posts")
        );
    }
}
