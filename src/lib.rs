//! Session-authenticated blogging backend.
//!
//! `quill` owns the parts of a small multi-user blog that carry real
//! invariants: credentials, server-side sessions, authorization checks and
//! the post repository those checks gate. Page rendering and static assets
//! are left to the embedding application, which calls into [`api::BlogApi`]
//! and the [`actions`] for everything identity related.
//!
//! # Layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`repository`] | Storage traits and data types (plus in-memory mocks) |
//! | [`sqlite`] | sqlx `SQLite` implementations and migrations |
//! | [`session`] | Session issuing, validation with lazy reaping, cookies |
//! | [`credentials`] | Registration, password verification, user lookup |
//! | [`guard`] | Identity resolution and per-operation authorization |
//! | [`content`] | Posts with eagerly resolved authors |
//! | [`actions`] | Register / login / logout / current-user workflows |
//! | [`api`] | The query/mutation façade and the axum HTTP surface |
//! | [`events`] | Event dispatch to registered listeners |

pub mod actions;
pub mod api;
pub mod config;
pub mod content;
pub mod credentials;
pub mod crypto;
pub mod events;
pub mod guard;
pub mod repository;
mod secret;
pub mod session;
#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;
mod timeout;
pub mod validators;

pub use config::BlogConfig;
pub use events::{BlogEvent, register_event_listeners};
pub use repository::{
    Author, NewSession, Post, PostRepository, PostView, RegistrationRepository, SessionRecord,
    SessionRepository, User, UserRepository,
};
#[cfg(any(test, feature = "mocks"))]
pub use repository::{
    MockPostRepository, MockRegistrationRepository, MockSessionRepository, MockUserRepository,
};
pub use secret::SecretString;
pub use validators::ValidationError;

/// Every failure the core can report.
///
/// Authentication failures never reveal whether a username exists:
/// unknown names and wrong passwords both surface as
/// [`BlogError::InvalidCredentials`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlogError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Not authorized to perform this operation")]
    Unauthorized,
    #[error("Session is missing, expired or invalid")]
    InvalidSession,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0} already exists")]
    Conflict(&'static str),
    #[error("Referenced record does not exist")]
    ForeignKeyViolation,
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Failed to hash password")]
    PasswordHash,
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl BlogError {
    /// Stable machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidSession => "INVALID_SESSION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Conflict(_) => "CONFLICT",
            Self::ForeignKeyViolation => "FOREIGN_KEY_VIOLATION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PasswordHash => "PASSWORD_HASH_ERROR",
            Self::Infrastructure(_) => "INFRASTRUCTURE_ERROR",
        }
    }

    /// True for failures that abort the request regardless of input.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Infrastructure(_) | Self::PasswordHash)
    }
}
