//! Server-side sessions.
//!
//! [`SessionManager`] issues opaque tokens, stores only their SHA-256
//! digest, and resolves tokens back to user ids. Expired records are
//! deleted the moment a lookup finds them; there is no background sweep.

mod config;
#[cfg(feature = "axum_api")]
mod cookie;

use chrono::{DateTime, Utc};
pub use config::{MAX_SESSION_HOURS, SameSite, SessionConfig};
#[cfg(feature = "axum_api")]
pub use cookie::{build_removal_cookie, build_session_cookie, session_token_from_cookie_header};

use crate::crypto::{generate_session_token, hash_token, is_well_formed_token};
use crate::events::{BlogEvent, dispatch};
use crate::{BlogError, NewSession, SessionRepository};

/// Attempts made to store a fresh token before giving up on collisions.
pub(crate) const MAX_TOKEN_ATTEMPTS: usize = 3;

/// A token together with the values the store keeps for it.
#[derive(Debug, Clone)]
pub(crate) struct MintedToken {
    pub token: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues, validates and destroys sessions.
#[derive(Clone)]
pub struct SessionManager<S> {
    repository: S,
    config: SessionConfig,
}

impl<S: SessionRepository> SessionManager<S> {
    pub fn new(repository: S, config: SessionConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(crate) fn mint(&self) -> MintedToken {
        let token = generate_session_token();
        MintedToken {
            token_hash: hash_token(&token),
            token,
            expires_at: Utc::now()
                .checked_add_signed(self.config.session_lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Issues a new session for `user_id` and returns the plain token.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails or every
    /// attempt collides with an existing token.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "session.create", skip(self), err))]
    pub async fn create_session(&self, user_id: i64) -> Result<String, BlogError> {
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let minted = self.mint();
            let new_session = NewSession {
                token_hash: minted.token_hash,
                user_id,
                expires_at: minted.expires_at,
            };

            match self.repository.create_session(new_session).await {
                Ok(_) => return Ok(minted.token),
                Err(BlogError::Conflict(_)) => {
                    log::warn!(
                        target: "quill::session",
                        "msg=\"session token collision\", user_id={user_id}, attempt={attempt}"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        log::error!(
            target: "quill::session",
            "msg=\"session token collisions exhausted\", user_id={user_id}, attempts={MAX_TOKEN_ATTEMPTS}"
        );
        Err(BlogError::Infrastructure(
            "could not issue a unique session token".to_owned(),
        ))
    }

    /// Resolves `token` to its user id.
    ///
    /// Unknown and malformed tokens give `None`. An expired record is
    /// deleted before `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "session.validate", skip_all, err))]
    pub async fn validate_session(&self, token: &str) -> Result<Option<i64>, BlogError> {
        if !is_well_formed_token(token) {
            return Ok(None);
        }

        let token_hash = hash_token(token);
        let Some(record) = self.repository.find_session(&token_hash).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if record.is_live_at(now) {
            return Ok(Some(record.user_id));
        }

        self.repository.delete_session(&token_hash).await?;
        log::debug!(
            target: "quill::session",
            "msg=\"expired session reaped\", user_id={}",
            record.user_id
        );
        dispatch(BlogEvent::SessionExpired {
            user_id: record.user_id,
            expired_at: record.expires_at,
            at: now,
        })
        .await;

        Ok(None)
    }

    /// Same contract as [`validate_session`](Self::validate_session),
    /// including the reap of expired records.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails.
    pub async fn get_user_from_session(&self, token: &str) -> Result<Option<i64>, BlogError> {
        self.validate_session(token).await
    }

    /// Deletes the session for `token`. Unknown tokens are not an error.
    ///
    /// Returns the user id the session belonged to, if it existed.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "session.destroy", skip_all, err))]
    pub async fn destroy_session(&self, token: &str) -> Result<Option<i64>, BlogError> {
        if !is_well_formed_token(token) {
            return Ok(None);
        }

        let token_hash = hash_token(token);
        let owner = self
            .repository
            .find_session(&token_hash)
            .await?
            .map(|record| record.user_id);
        self.repository.delete_session(&token_hash).await?;

        Ok(owner)
    }

    /// Moves the expiry of the session behind `token`. Returns whether the
    /// session existed.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails.
    pub async fn set_expiry(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BlogError> {
        if !is_well_formed_token(token) {
            return Ok(false);
        }
        self.repository
            .set_expiry(&hash_token(token), expires_at)
            .await
    }
}
