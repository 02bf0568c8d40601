use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{SessionRecord, User};
use crate::BlogError;

/// Creates an account and its first session as one unit of work.
///
/// Either both rows exist afterwards or neither does. A taken name is
/// reported as `BlogError::Conflict("Username")`, a token digest collision
/// as `BlogError::Conflict("Session")`.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn register(
        &self,
        name: &str,
        password_hash: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(User, SessionRecord), BlogError>;
}
