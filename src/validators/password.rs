use serde::{Deserialize, Serialize};

use super::ValidationError;
use crate::SecretString;

/// Length rules for new passwords.
///
/// ```
/// use quill::validators::PasswordPolicy;
///
/// let policy = PasswordPolicy::default();
/// assert!(policy.validate("secret1").is_ok());
/// assert!(policy.validate("short").is_err());
///
/// let strict = PasswordPolicy::default().min(12);
/// assert!(strict.validate("secret1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum length in characters (default: 6)
    pub min_length: usize,
    /// Maximum length in characters (default: 128)
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 128,
        }
    }
}

impl PasswordPolicy {
    #[must_use]
    pub fn min(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    #[must_use]
    pub fn max(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    /// # Errors
    ///
    /// Returns a `ValidationError` if the password breaks the policy.
    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::PasswordEmpty);
        }

        let length = password.chars().count();
        if length < self.min_length {
            return Err(ValidationError::PasswordTooShort(self.min_length));
        }
        if length > self.max_length {
            return Err(ValidationError::PasswordTooLong(self.max_length));
        }

        Ok(())
    }

    /// Same as [`PasswordPolicy::validate`] for a wrapped secret.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the password breaks the policy.
    pub fn validate_secret(&self, password: &SecretString) -> Result<(), ValidationError> {
        self.validate(password.expose_secret())
    }
}

/// Validates a password using the default policy (6-128 characters).
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    PasswordPolicy::default().validate(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_accepts_six_characters() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("secret1").is_ok());
    }

    #[test]
    fn test_password_empty() {
        assert_eq!(validate_password("").unwrap_err(), ValidationError::PasswordEmpty);
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("abcde").unwrap_err(),
            ValidationError::PasswordTooShort(6)
        );
    }

    #[test]
    fn test_password_too_long() {
        let long = "a".repeat(129);
        assert_eq!(
            validate_password(&long).unwrap_err(),
            ValidationError::PasswordTooLong(128)
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // 6 characters, 12 bytes
        assert!(validate_password("ééééé").is_err());
        assert!(validate_password("éééééé").is_ok());
    }

    #[test]
    fn test_builder() {
        let policy = PasswordPolicy::default().min(10).max(20);
        assert_eq!(policy.min_length, 10);
        assert_eq!(policy.max_length, 20);
        assert!(policy.validate_secret(&SecretString::new("0123456789")).is_ok());
    }
}
