//! Password hashing and session token primitives.

use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use password_hash::{PasswordHash, PasswordHasher as _, SaltString};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::BlogError;

/// Random bytes behind every session token (256 bits).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Encoded length of a session token: base64url without padding.
pub const SESSION_TOKEN_LENGTH: usize = 43;

/// One-way password transform.
///
/// The stored value is whatever [`PasswordHasher::hash`] returns; the
/// plaintext never reaches the store, so no read path can hand it back.
pub trait PasswordHasher: Send + Sync {
    /// # Errors
    ///
    /// Returns `BlogError::PasswordHash` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, BlogError>;

    /// Checks `password` against a stored hash. The digest comparison is
    /// constant-time.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::PasswordHash` if the stored hash is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, BlogError>;
}

/// Argon2id hasher.
///
/// ```rust
/// use quill::crypto::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::new(8192, 1, 1);
/// let hash = hasher.hash("secret1").unwrap();
/// assert!(hasher.verify("secret1", &hash).unwrap());
/// assert!(!hasher.verify("secret2", &hash).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Memory cost in KiB
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Hasher {
    #[must_use]
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, BlogError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| BlogError::PasswordHash)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| BlogError::PasswordHash)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, BlogError> {
        let parsed = PasswordHash::new(hash).map_err(|_| BlogError::PasswordHash)?;

        // params come from the PHC string, not from self
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Generates a fresh session token from the OS CSPRNG.
///
/// 32 random bytes, base64url encoded without padding, so the token is safe
/// to put in a cookie or URL as is.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Whether `token` could have been produced by [`generate_session_token`].
///
/// Lets lookups skip the store for values that can never match.
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == SESSION_TOKEN_LENGTH
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// SHA-256 digest of a session token, hex encoded.
///
/// Session tokens are high-entropy, so a fast digest is enough; the store
/// only ever sees this value.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
