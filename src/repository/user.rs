use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::BlogError;

/// A registered account.
///
/// `password_hash` is the output of the configured
/// [`PasswordHasher`](crate::crypto::PasswordHasher) and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user, safe to embed in any response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Author {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

impl From<User> for Author {
    fn from(user: User) -> Self {
        Author {
            id: user.id,
            name: user.name,
        }
    }
}

#[cfg(any(test, feature = "mocks"))]
impl User {
    pub fn mock(id: i64, name: &str) -> Self {
        User {
            id,
            name: name.to_owned(),
            password_hash: "fakehashedpassword".to_owned(),
            created_at: Utc::now(),
        }
    }
}

/// Storage for user accounts.
///
/// Implementations must enforce name uniqueness themselves (a UNIQUE
/// constraint, or a check under the same lock as the insert) and report a
/// duplicate as `BlogError::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn user_exists(&self, name: &str) -> Result<bool, BlogError>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, BlogError>;
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, BlogError>;
    /// Bulk lookup. Unknown ids are skipped; order is unspecified.
    async fn find_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, BlogError>;
    async fn create_user(&self, name: &str, password_hash: &str) -> Result<User, BlogError>;
}
