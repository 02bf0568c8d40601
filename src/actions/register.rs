use std::time::Duration;

use chrono::Utc;

use crate::credentials::CredentialStore;
use crate::crypto::PasswordHasher;
use crate::events::{BlogEvent, dispatch};
use crate::session::{MAX_TOKEN_ATTEMPTS, SessionManager};
use crate::timeout::{DEFAULT_STORE_TIMEOUT, within};
use crate::validators::{PasswordPolicy, validate_registration};
use crate::{
    Author, BlogError, RegistrationRepository, SecretString, SessionRepository, User, UserRepository,
};

/// Creates an account and its first session in one store transaction.
pub struct RegisterAction<U, R, S, H>
where
    U: UserRepository,
    R: RegistrationRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    credentials: CredentialStore<U, H>,
    registration: R,
    sessions: SessionManager<S>,
    policy: PasswordPolicy,
    timeout: Duration,
}

impl<U, R, S, H> RegisterAction<U, R, S, H>
where
    U: UserRepository,
    R: RegistrationRepository,
    S: SessionRepository,
    H: PasswordHasher,
{
    pub fn new(
        credentials: CredentialStore<U, H>,
        registration: R,
        sessions: SessionManager<S>,
        policy: PasswordPolicy,
    ) -> Self {
        RegisterAction {
            credentials,
            registration,
            sessions,
            policy,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Registers `username` and returns the user with a live session token.
    ///
    /// # Returns
    ///
    /// - `Ok((user, token))` - account created, session issued
    /// - `Err(BlogError::Validation(_))` - form rejected
    /// - `Err(BlogError::Conflict("Username"))` - name taken
    /// - `Err(_)` - store or hashing failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "register", skip(self, password, confirm_password), err)
    )]
    pub async fn execute(
        &self,
        username: &str,
        password: &SecretString,
        confirm_password: &SecretString,
    ) -> Result<(User, String), BlogError> {
        validate_registration(username, password, confirm_password, &self.policy)?;

        // fast path for the common case; the UNIQUE constraint still decides races
        if within(self.timeout, "user_exists", self.credentials.user_exists(username)).await? {
            return Err(BlogError::Conflict("Username"));
        }

        let password_hash = self.credentials.hasher().hash(password.expose_secret())?;

        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let minted = self.sessions.mint();
            let registered = within(
                self.timeout,
                "register",
                self.registration.register(
                    username,
                    &password_hash,
                    &minted.token_hash,
                    minted.expires_at,
                ),
            )
            .await;

            match registered {
                Ok((user, _)) => {
                    // committed: nothing below may fail the registration
                    log::info!(
                        target: "quill",
                        "msg=\"user registered\", user_id={}",
                        user.id
                    );
                    dispatch(BlogEvent::UserRegistered {
                        user: Author::from(&user),
                        at: Utc::now(),
                    })
                    .await;
                    return Ok((user, minted.token));
                }
                Err(BlogError::Conflict("Session")) => {
                    log::warn!(
                        target: "quill::session",
                        "msg=\"session token collision\", attempt={attempt}"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(BlogError::Infrastructure(
            "could not issue a unique session token".to_owned(),
        ))
    }
}
