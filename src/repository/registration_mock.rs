#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::BlogError;

use super::registration::RegistrationRepository;
use super::session::{NewSession, SessionRecord};
use super::session_mock::MockSessionRepository;
use super::user::User;
use super::user_mock::MockUserRepository;

/// Registration over the user and session mocks, holding both locks so the
/// pair of inserts is all-or-nothing.
#[derive(Clone)]
pub struct MockRegistrationRepository {
    users: MockUserRepository,
    sessions: MockSessionRepository,
}

impl MockRegistrationRepository {
    pub fn new(users: MockUserRepository, sessions: MockSessionRepository) -> Self {
        Self { users, sessions }
    }
}

#[async_trait]
impl RegistrationRepository for MockRegistrationRepository {
    async fn register(
        &self,
        name: &str,
        password_hash: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(User, SessionRecord), BlogError> {
        let mut users = self.users.users.lock().unwrap();
        let mut sessions = self.sessions.sessions.lock().unwrap();

        if sessions.contains_key(token_hash) {
            return Err(BlogError::Conflict("Session"));
        }

        let user = self.users.insert_locked(&mut users, name, password_hash)?;
        let record = MockSessionRepository::insert_locked(
            &mut sessions,
            NewSession {
                token_hash: token_hash.to_owned(),
                user_id: user.id,
                expires_at,
            },
        )?;

        Ok((user, record))
    }
}
