//! The typed read/write API and its HTTP surface.
//!
//! [`BlogApi`] composes the guard, the credential store and the content
//! repository into the five public operations. Every operation runs under
//! the configured store timeout.
//!
//! | Operation | Session | Rule |
//! |-----------|---------|------|
//! | [`BlogApi::get_user`] | required | admin or self |
//! | [`BlogApi::get_post`] | none | |
//! | [`BlogApi::get_all_posts`] | none | |
//! | [`BlogApi::get_users_posts`] | none | |
//! | [`BlogApi::create_post`] | required | caller is the author |

mod types;

pub use types::*;

#[cfg(feature = "axum_api")]
pub mod axum;

use std::time::Duration;

use chrono::Utc;

use crate::config::BlogConfig;
use crate::content::ContentRepository;
use crate::credentials::CredentialStore;
use crate::crypto::{Argon2Hasher, PasswordHasher};
use crate::events::{BlogEvent, dispatch};
use crate::guard::AuthorizationGuard;
use crate::session::SessionManager;
use crate::timeout::within;
use crate::{BlogError, PostRepository, PostView, SessionRepository, UserRepository};

#[derive(Clone)]
pub struct BlogApi<U, P, S, H = Argon2Hasher> {
    guard: AuthorizationGuard<S>,
    credentials: CredentialStore<U, H>,
    content: ContentRepository<P, U>,
    timeout: Duration,
}

impl<U, P, S> BlogApi<U, P, S>
where
    U: UserRepository + Clone,
    P: PostRepository,
    S: SessionRepository,
{
    /// Wires the façade from repositories and settings.
    pub fn from_repositories(users: U, posts: P, sessions: S, config: &BlogConfig) -> Self {
        let sessions = SessionManager::new(sessions, config.session.clone());
        BlogApi::new(
            AuthorizationGuard::new(sessions, config.admin_user_id),
            CredentialStore::new(users.clone()),
            ContentRepository::new(posts, users),
            config.store_timeout,
        )
    }
}

impl<U, P, S, H> BlogApi<U, P, S, H>
where
    U: UserRepository,
    P: PostRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub fn new(
        guard: AuthorizationGuard<S>,
        credentials: CredentialStore<U, H>,
        content: ContentRepository<P, U>,
        timeout: Duration,
    ) -> Self {
        Self {
            guard,
            credentials,
            content,
            timeout,
        }
    }

    pub fn guard(&self) -> &AuthorizationGuard<S> {
        &self.guard
    }

    pub fn credentials(&self) -> &CredentialStore<U, H> {
        &self.credentials
    }

    /// A user's profile. Only the admin and the user themselves may read it.
    ///
    /// # Errors
    ///
    /// `InvalidSession`, `Unauthorized`, `NotFound("User")`, or
    /// `Infrastructure`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    pub async fn get_user(&self, token: Option<&str>, id: i64) -> Result<UserProfile, BlogError> {
        within(self.timeout, "get_user", async {
            self.guard.authorize_user_read(token, id).await?;
            let user = self.credentials.fetch_user_by_id(id).await?;
            Ok(UserProfile::from(user))
        })
        .await
    }

    /// # Errors
    ///
    /// `NotFound("Post")` if no post has `id`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn get_post(&self, id: i64) -> Result<PostView, BlogError> {
        within(self.timeout, "get_post", self.content.fetch_post_by_id(id)).await
    }

    /// # Errors
    ///
    /// `Infrastructure` if the store fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn get_all_posts(&self) -> Result<Vec<PostView>, BlogError> {
        within(self.timeout, "get_all_posts", self.content.fetch_all_posts()).await
    }

    /// Posts by one user. Needs no session.
    ///
    /// # Errors
    ///
    /// `NotFound("Posts")` when the user has no posts.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn get_users_posts(&self, id: i64) -> Result<Vec<PostView>, BlogError> {
        within(
            self.timeout,
            "get_users_posts",
            self.content.fetch_posts_by_author(id),
        )
        .await
    }

    /// Creates a post as the caller and returns it as stored.
    ///
    /// Each store call gets its own deadline. Once the insert has returned
    /// the post is reported as created.
    ///
    /// # Errors
    ///
    /// `InvalidSession`, `Unauthorized` when `author_id` is not the caller,
    /// `ForeignKeyViolation`, or `Infrastructure`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token, content), err))]
    pub async fn create_post(
        &self,
        token: Option<&str>,
        title: &str,
        content: &str,
        author_id: i64,
    ) -> Result<PostView, BlogError> {
        within(
            self.timeout,
            "authorize_post_create",
            self.guard.authorize_post_create(token, author_id),
        )
        .await?;

        let author = within(self.timeout, "find_author", self.content.find_author(author_id))
            .await?
            .ok_or(BlogError::ForeignKeyViolation)?;

        let post = within(
            self.timeout,
            "insert_post",
            self.content.store_post(title, content, author_id),
        )
        .await?;

        let view = PostView::new(post, author);
        dispatch(BlogEvent::PostCreated {
            post: view.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(view)
    }
}
