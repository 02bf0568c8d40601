#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::BlogError;

use super::session::{NewSession, SessionRecord, SessionRepository};

#[derive(Clone, Default)]
pub struct MockSessionRepository {
    pub sessions: Arc<Mutex<HashMap<String, SessionRecord>>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert_locked(
        sessions: &mut HashMap<String, SessionRecord>,
        session: NewSession,
    ) -> Result<SessionRecord, BlogError> {
        if sessions.contains_key(&session.token_hash) {
            return Err(BlogError::Conflict("Session"));
        }

        let record = SessionRecord {
            token_hash: session.token_hash,
            user_id: session.user_id,
            expires_at: session.expires_at,
            created_at: Utc::now(),
        };
        sessions.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create_session(&self, session: NewSession) -> Result<SessionRecord, BlogError> {
        let mut sessions = self.sessions.lock().unwrap();
        Self::insert_locked(&mut sessions, session)
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>, BlogError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.get(token_hash).cloned())
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool, BlogError> {
        let mut sessions = self.sessions.lock().unwrap();
        Ok(sessions.remove(token_hash).is_some())
    }

    async fn set_expiry(
        &self,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BlogError> {
        let mut sessions = self.sessions.lock().unwrap();
        Ok(match sessions.get_mut(token_hash) {
            Some(record) => {
                record.expires_at = expires_at;
                true
            }
            None => false,
        })
    }
}
