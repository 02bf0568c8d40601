use super::{PasswordPolicy, ValidationError, validate_username};
use crate::SecretString;

/// Checks a registration form before anything touches the store.
///
/// Order matters for the message the user sees: missing fields first, then
/// the confirmation mismatch, then the password policy, then the username
/// shape. Whether the username is taken is decided by the store.
pub fn validate_registration(
    username: &str,
    password: &SecretString,
    confirm_password: &SecretString,
    policy: &PasswordPolicy,
) -> Result<(), ValidationError> {
    if username.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    policy.validate_secret(password)?;
    validate_username(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(username: &str, password: &str, confirm: &str) -> Result<(), ValidationError> {
        validate_registration(
            username,
            &SecretString::new(password),
            &SecretString::new(confirm),
            &PasswordPolicy::default(),
        )
    }

    #[test]
    fn test_valid_registration() {
        assert!(check("alice", "secret1", "secret1").is_ok());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(check("", "secret1", "secret1"), Err(ValidationError::MissingFields));
        assert_eq!(check("alice", "", "secret1"), Err(ValidationError::MissingFields));
        assert_eq!(check("alice", "secret1", ""), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_mismatch_reported_before_length() {
        assert_eq!(check("alice", "abc", "abd"), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_short_password() {
        assert_eq!(
            check("alice", "abc", "abc"),
            Err(ValidationError::PasswordTooShort(6))
        );
    }

    #[test]
    fn test_blank_username() {
        assert_eq!(
            check("   ", "secret1", "secret1"),
            Err(ValidationError::UsernameEmpty)
        );
    }
}
