#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::BlogError;

use super::user::{User, UserRepository};

#[derive(Clone)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicI64>,
    bulk_lookups: Arc<AtomicUsize>,
    single_lookups: Arc<AtomicUsize>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(AtomicI64::new(1)),
            bulk_lookups: Arc::new(AtomicUsize::new(0)),
            single_lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Seeds a user directly, bypassing hashing.
    pub fn insert(&self, user: User) {
        self.next_id.fetch_max(user.id + 1, Ordering::SeqCst);
        self.users.lock().unwrap().push(user);
    }

    /// Number of `find_users_by_ids` calls so far.
    pub fn bulk_lookups(&self) -> usize {
        self.bulk_lookups.load(Ordering::SeqCst)
    }

    /// Number of `find_user_by_id` calls so far.
    pub fn single_lookups(&self) -> usize {
        self.single_lookups.load(Ordering::SeqCst)
    }

    /// Inserts under an already held lock so callers can combine it with
    /// other writes atomically.
    pub(crate) fn insert_locked(
        &self,
        users: &mut Vec<User>,
        name: &str,
        password_hash: &str,
    ) -> Result<User, BlogError> {
        if users.iter().any(|u| u.name == name) {
            return Err(BlogError::Conflict("Username"));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn user_exists(&self, name: &str) -> Result<bool, BlogError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.name == name))
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, BlogError> {
        self.single_lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, BlogError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.name == name).cloned())
    }

    async fn find_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, BlogError> {
        self.bulk_lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create_user(&self, name: &str, password_hash: &str) -> Result<User, BlogError> {
        let mut users = self.users.lock().unwrap();
        self.insert_locked(&mut users, name, password_hash)
    }
}
