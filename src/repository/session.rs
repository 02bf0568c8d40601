use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::BlogError;

/// A session as persisted: keyed by the digest of its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Live while `now <= expires_at`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}

/// Values needed to insert a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Storage for sessions.
///
/// Only the [`SessionManager`](crate::session::SessionManager) should talk
/// to this trait; it owns hashing and expiry.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fails with `BlogError::Conflict` if `token_hash` is already stored.
    async fn create_session(&self, session: NewSession) -> Result<SessionRecord, BlogError>;
    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, BlogError>;
    /// Returns whether a record was removed. Absent hashes are not an error.
    async fn delete_session(&self, token_hash: &str) -> Result<bool, BlogError>;
    /// Moves the expiry of an existing session. Returns whether it existed.
    async fn set_expiry(
        &self,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BlogError>;
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record(expires_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            token_hash: "hash".to_owned(),
            user_id: 1,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_live_until_and_including_expiry() {
        let now = Utc::now();
        assert!(record(now + Duration::hours(1)).is_live_at(now));
        assert!(record(now).is_live_at(now));
        assert!(!record(now - Duration::seconds(1)).is_live_at(now));
    }
}
