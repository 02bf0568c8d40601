use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

/// Longest accepted session lifetime, one year.
pub const MAX_SESSION_HOURS: i64 = 24 * 365;

/// Session lifetime and cookie attributes.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    /// How long a freshly issued session stays valid. Default: 24 hours.
    pub session_lifetime: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session_token".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_secure: false,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            session_lifetime: Duration::hours(24),
        }
    }
}

impl SessionConfig {
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.cookie_name.trim().is_empty() {
            return Err("cookie_name must not be empty");
        }
        if !self.cookie_http_only {
            return Err("session cookies must be HTTP-only");
        }
        if self.session_lifetime <= Duration::zero() {
            return Err("session_lifetime must be positive");
        }
        if self.session_lifetime > Duration::hours(MAX_SESSION_HOURS) {
            return Err("session_lifetime must not exceed one year");
        }
        if self.cookie_same_site == SameSite::None && !self.cookie_secure {
            return Err("SameSite=None requires a secure cookie");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "session_token");
        assert_eq!(config.cookie_path, "/");
        assert!(config.cookie_http_only);
        assert_eq!(config.session_lifetime, Duration::hours(24));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_only() {
        let config = SessionConfig {
            cookie_http_only: false,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_lifetime() {
        let config = SessionConfig {
            session_lifetime: Duration::zero(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_lifetime() {
        let config = SessionConfig {
            session_lifetime: Duration::hours(MAX_SESSION_HOURS),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = SessionConfig {
            session_lifetime: Duration::hours(MAX_SESSION_HOURS + 1),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err("session_lifetime must not exceed one year")
        );
    }

    #[test]
    fn test_validate_same_site_none_needs_secure() {
        let config = SessionConfig {
            cookie_same_site: SameSite::None,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SessionConfig {
            cookie_same_site: SameSite::None,
            cookie_secure: true,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
