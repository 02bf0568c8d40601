use std::time::Duration;

use crate::api::PublicIdentity;
use crate::guard::AuthorizationGuard;
use crate::timeout::{DEFAULT_STORE_TIMEOUT, within};
use crate::{BlogError, SessionRepository, UserRepository};

/// Resolves the session cookie to `{id, name}`.
pub struct CurrentUserAction<S: SessionRepository, U: UserRepository> {
    guard: AuthorizationGuard<S>,
    users: U,
    timeout: Duration,
}

impl<S: SessionRepository, U: UserRepository> CurrentUserAction<S, U> {
    pub fn new(guard: AuthorizationGuard<S>, users: U) -> Self {
        CurrentUserAction {
            guard,
            users,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// # Errors
    ///
    /// Returns `BlogError::InvalidSession` without a live session, or when
    /// the session points at a user that no longer exists.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "current_user", skip_all, err)
    )]
    pub async fn execute(&self, token: Option<&str>) -> Result<PublicIdentity, BlogError> {
        within(self.timeout, "current_user", async {
            let user_id = self.guard.current_user(token).await?;
            self.users
                .find_user_by_id(user_id)
                .await?
                .map(|user| PublicIdentity {
                    id: user.id,
                    name: user.name,
                })
                .ok_or(BlogError::InvalidSession)
        })
        .await
    }
}
