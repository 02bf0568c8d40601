//! Identity resolution and per-operation authorization.

use crate::session::SessionManager;
use crate::{BlogError, SessionRepository};

/// Admin or self may read a user; only the author may post as themselves.
#[derive(Clone)]
pub struct AuthorizationGuard<S> {
    sessions: SessionManager<S>,
    admin_user_id: i64,
}

impl<S: SessionRepository> AuthorizationGuard<S> {
    pub fn new(sessions: SessionManager<S>, admin_user_id: i64) -> Self {
        Self {
            sessions,
            admin_user_id,
        }
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    /// Resolves the caller behind `token`.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::InvalidSession` when the token is missing,
    /// unknown or expired.
    pub async fn current_user(&self, token: Option<&str>) -> Result<i64, BlogError> {
        let Some(token) = token else {
            return Err(BlogError::InvalidSession);
        };

        self.sessions
            .validate_session(token)
            .await?
            .ok_or(BlogError::InvalidSession)
    }

    /// The caller must be the admin or `target_id` itself.
    ///
    /// # Errors
    ///
    /// `BlogError::InvalidSession` without a live session,
    /// `BlogError::Unauthorized` for anyone else.
    pub async fn authorize_user_read(
        &self,
        token: Option<&str>,
        target_id: i64,
    ) -> Result<i64, BlogError> {
        let caller = self.current_user(token).await?;

        if caller == self.admin_user_id || caller == target_id {
            Ok(caller)
        } else {
            log::warn!(
                target: "quill::guard",
                "msg=\"user read denied\", caller={caller}, target={target_id}"
            );
            Err(BlogError::Unauthorized)
        }
    }

    /// The caller must be `author_id`.
    ///
    /// # Errors
    ///
    /// `BlogError::InvalidSession` without a live session,
    /// `BlogError::Unauthorized` on mismatch.
    pub async fn authorize_post_create(
        &self,
        token: Option<&str>,
        author_id: i64,
    ) -> Result<i64, BlogError> {
        let caller = self.current_user(token).await?;

        if caller == author_id {
            Ok(caller)
        } else {
            log::warn!(
                target: "quill::guard",
                "msg=\"post create denied\", caller={caller}, author_id={author_id}"
            );
            Err(BlogError::Unauthorized)
        }
    }
}
