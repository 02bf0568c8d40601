use std::time::Duration;

use chrono::Utc;

use crate::credentials::CredentialStore;
use crate::crypto::PasswordHasher;
use crate::events::{BlogEvent, dispatch};
use crate::session::SessionManager;
use crate::timeout::{DEFAULT_STORE_TIMEOUT, within};
use crate::{Author, BlogError, SecretString, SessionRepository, User, UserRepository};

pub struct LoginAction<U: UserRepository, S: SessionRepository, H: PasswordHasher> {
    credentials: CredentialStore<U, H>,
    sessions: SessionManager<S>,
    timeout: Duration,
}

impl<U: UserRepository, S: SessionRepository, H: PasswordHasher> LoginAction<U, S, H> {
    pub fn new(credentials: CredentialStore<U, H>, sessions: SessionManager<S>) -> Self {
        LoginAction {
            credentials,
            sessions,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Verifies the credentials and issues a session.
    ///
    /// # Returns
    ///
    /// - `Ok((user, token))` - credentials valid, session created
    /// - `Err(BlogError::InvalidCredentials)` - unknown name or wrong password
    /// - `Err(_)` - store or hashing failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip(self, password), err)
    )]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<(User, String), BlogError> {
        if username.is_empty() || password.is_empty() {
            return Err(BlogError::InvalidCredentials);
        }

        let authenticated = within(
            self.timeout,
            "authenticate_user",
            self.credentials.authenticate_user(username, password),
        )
        .await?;

        let Some(user) = authenticated else {
            log::info!(target: "quill", "msg=\"login failed\"");
            dispatch(BlogEvent::LoginFailed {
                name: username.to_owned(),
                at: Utc::now(),
            })
            .await;
            return Err(BlogError::InvalidCredentials);
        };

        let token = within(
            self.timeout,
            "create_session",
            self.sessions.create_session(user.id),
        )
        .await?;

        log::info!(target: "quill", "msg=\"login success\", user_id={}", user.id);
        dispatch(BlogEvent::LoginSuccess {
            user: Author::from(&user),
            at: Utc::now(),
        })
        .await;

        Ok((user, token))
    }
}
