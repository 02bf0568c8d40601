//! Configuration for the blogging core.
//!
//! All settings have working defaults; [`BlogConfig::from_env`] overlays the
//! environment on top of them for the server binary.
//!
//! # Example
//!
//! ```rust
//! use quill::config::BlogConfig;
//! use quill::session::SessionConfig;
//! use chrono::Duration;
//!
//! let config = BlogConfig {
//!     session: SessionConfig {
//!         session_lifetime: Duration::hours(8),
//!         ..Default::default()
//!     },
//!     admin_user_id: 42,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::session::SessionConfig;
use crate::validators::PasswordPolicy;

/// Configuration problems detected while loading or validating settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidVariable { name: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub session: SessionConfig,

    pub password_policy: PasswordPolicy,

    /// The privileged identity allowed to read any user's record.
    ///
    /// Default: 1
    pub admin_user_id: i64,

    /// Upper bound on a single store round trip before the call is failed
    /// as an infrastructure error.
    ///
    /// Default: 5 seconds
    pub store_timeout: StdDuration,

    /// Default: `sqlite::memory:`
    pub database_url: String,

    /// Default: `127.0.0.1:8080`
    pub bind_addr: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            password_policy: PasswordPolicy::default(),
            admin_user_id: 1,
            store_timeout: crate::timeout::DEFAULT_STORE_TIMEOUT,
            database_url: "sqlite::memory:".to_owned(),
            bind_addr: "127.0.0.1:8080".to_owned(),
        }
    }
}

impl BlogConfig {
    /// Local development settings: a file-backed database next to the
    /// binary and a generous store timeout.
    pub fn development() -> Self {
        Self {
            store_timeout: StdDuration::from_secs(30),
            database_url: "sqlite://quill.db?mode=rwc".to_owned(),
            ..Self::default()
        }
    }

    /// Builds a configuration from the process environment.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `DATABASE_URL` | `database_url` |
    /// | `QUILL_BIND_ADDR` | `bind_addr` |
    /// | `QUILL_ADMIN_USER_ID` | `admin_user_id` |
    /// | `QUILL_SESSION_HOURS` | `session.session_lifetime` |
    /// | `QUILL_COOKIE_SECURE` | `session.cookie_secure` |
    /// | `QUILL_STORE_TIMEOUT_MS` | `store_timeout` |
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is present but unparsable, or
    /// when the resulting configuration fails [`BlogConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(addr) = lookup("QUILL_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(raw) = lookup("QUILL_ADMIN_USER_ID") {
            config.admin_user_id = parse_var("QUILL_ADMIN_USER_ID", &raw)?;
        }
        if let Some(raw) = lookup("QUILL_SESSION_HOURS") {
            let hours: i64 = parse_var("QUILL_SESSION_HOURS", &raw)?;
            config.session.session_lifetime =
                Duration::try_hours(hours).ok_or_else(|| ConfigError::InvalidVariable {
                    name: "QUILL_SESSION_HOURS",
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup("QUILL_COOKIE_SECURE") {
            config.session.cookie_secure = parse_var("QUILL_COOKIE_SECURE", &raw)?;
        }
        if let Some(raw) = lookup("QUILL_STORE_TIMEOUT_MS") {
            let millis: u64 = parse_var("QUILL_STORE_TIMEOUT_MS", &raw)?;
            config.store_timeout = StdDuration::from_millis(millis);
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate().map_err(ConfigError::Invalid)?;
        if self.store_timeout.is_zero() {
            return Err(ConfigError::Invalid("store_timeout must be positive"));
        }
        if self.password_policy.min_length > self.password_policy.max_length {
            return Err(ConfigError::Invalid(
                "password min_length exceeds max_length",
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidVariable {
        name,
        value: raw.to_owned(),
    })
}
