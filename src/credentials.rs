//! Users and their passwords.

use std::sync::{Arc, OnceLock};

use crate::crypto::{Argon2Hasher, PasswordHasher};
use crate::{BlogError, SecretString, User, UserRepository};

const DUMMY_PASSWORD: &str = "quill-dummy-password";

/// Registration, password verification and user lookup over a
/// [`UserRepository`].
#[derive(Clone)]
pub struct CredentialStore<U, H = Argon2Hasher> {
    repository: U,
    hasher: H,
    dummy_hash: Arc<OnceLock<String>>,
}

impl<U: UserRepository> CredentialStore<U> {
    pub fn new(repository: U) -> Self {
        Self::with_hasher(repository, Argon2Hasher::default())
    }
}

impl<U: UserRepository, H: PasswordHasher> CredentialStore<U, H> {
    pub fn with_hasher(repository: U, hasher: H) -> Self {
        Self {
            repository,
            hasher,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails.
    pub async fn user_exists(&self, name: &str) -> Result<bool, BlogError> {
        self.repository.user_exists(name).await
    }

    /// Hashes `password` and inserts the user.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Conflict` if the name is taken,
    /// `BlogError::PasswordHash` if hashing fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, password), err))]
    pub async fn create_user(&self, name: &str, password: &SecretString) -> Result<User, BlogError> {
        let password_hash = self.hasher.hash(password.expose_secret())?;
        let user = self.repository.create_user(name, &password_hash).await?;

        log::info!(target: "quill", "msg=\"user created\", user_id={}", user.id);
        Ok(user)
    }

    /// Checks a name/password pair.
    ///
    /// Unknown names still pay for one hash verification, so both failure
    /// cases take about as long and both give `None`.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Infrastructure` if the store fails and
    /// `BlogError::PasswordHash` if the stored hash cannot be parsed.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, password), err))]
    pub async fn authenticate_user(
        &self,
        name: &str,
        password: &SecretString,
    ) -> Result<Option<User>, BlogError> {
        let Some(user) = self.repository.find_user_by_name(name).await? else {
            self.burn_verification(password);
            return Ok(None);
        };

        if self
            .hasher
            .verify(password.expose_secret(), &user.password_hash)?
        {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// # Errors
    ///
    /// Returns `BlogError::NotFound` if no user has `id`.
    pub async fn fetch_user_by_id(&self, id: i64) -> Result<User, BlogError> {
        self.repository
            .find_user_by_id(id)
            .await?
            .ok_or(BlogError::NotFound("User"))
    }

    fn burn_verification(&self, password: &SecretString) {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => match self.hasher.hash(DUMMY_PASSWORD) {
                Ok(hash) => self.dummy_hash.get_or_init(|| hash),
                Err(_) => return,
            },
        };
        let _ = self.hasher.verify(password.expose_secret(), hash);
    }
}
