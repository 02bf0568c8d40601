use serde::{Deserialize, Serialize};

use crate::{BlogError, SecretString, User};

// Request DTOs

/// Missing fields deserialize as empty so validation reports them.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: SecretString,
    #[serde(default)]
    pub confirm_password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

// Response DTOs

/// Body of a successful login or registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_id: i64,
    pub name: String,
    pub message: String,
}

impl AuthResponse {
    pub fn new(user: &User, message: &str) -> Self {
        AuthResponse {
            user_id: user.id,
            name: user.name.clone(),
            message: message.to_owned(),
        }
    }
}

/// The caller's own identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    pub id: i64,
    pub name: String,
}

/// A user record as returned by `get_user`. Carries nothing derived from
/// the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<BlogError> for ErrorResponse {
    fn from(err: BlogError) -> Self {
        // infrastructure detail stays in the logs
        let error = if err.is_infrastructure() {
            "Internal server error".to_owned()
        } else {
            err.to_string()
        };

        ErrorResponse {
            error,
            code: err.code().to_owned(),
        }
    }
}
