use super::ValidationError;

pub const MAX_USERNAME_LENGTH: usize = 64;

/// Usernames are compared case-sensitively and stored exactly as given.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice").is_ok());
        assert!(validate_username("José García").is_ok());
        assert!(validate_username("名前").is_ok());
    }

    #[test]
    fn test_username_empty() {
        assert_eq!(validate_username("").unwrap_err(), ValidationError::UsernameEmpty);
        assert_eq!(validate_username("   ").unwrap_err(), ValidationError::UsernameEmpty);
    }

    #[test]
    fn test_username_too_long() {
        let long_name = "a".repeat(MAX_USERNAME_LENGTH + 1);
        assert_eq!(
            validate_username(&long_name).unwrap_err(),
            ValidationError::UsernameTooLong(MAX_USERNAME_LENGTH)
        );
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LENGTH)).is_ok());
    }
}
