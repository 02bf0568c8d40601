//! Input validation for registration and login.

pub mod password;
pub mod registration;
pub mod username;

pub use password::{PasswordPolicy, validate_password};
pub use registration::validate_registration;
pub use username::validate_username;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Username cannot be empty")]
    UsernameEmpty,
    #[error("Username is too long (max {0} characters)")]
    UsernameTooLong(usize),
    #[error("Password cannot be empty")]
    PasswordEmpty,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Password is too long (max {0} characters)")]
    PasswordTooLong(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
}
