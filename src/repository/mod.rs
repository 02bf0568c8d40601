//! Repository traits and data types.
//!
//! This module defines the storage seams of the crate. Every component takes
//! its repositories by value at construction time, so the same code runs
//! against [`sqlite`](crate::sqlite) in production and the in-memory mocks in
//! tests.
//!
//! # Traits
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | User lookup (single and bulk) and insert |
//! | [`SessionRepository`] | Session records keyed by token digest |
//! | [`PostRepository`] | Post lookup, listing and insert |
//! | [`RegistrationRepository`] | Atomic user + first session insert |
//!
//! # Data Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`User`] | Account with its password hash |
//! | [`Author`] | Public `{id, name}` projection of a user |
//! | [`Post`] | Stored post |
//! | [`PostView`] | Post with resolved author |
//! | [`SessionRecord`] | Stored session |
//!
//! # Mock Implementations
//!
//! Enable the `mocks` feature for in-memory implementations:
//!
//! - [`MockUserRepository`]
//! - [`MockSessionRepository`]
//! - [`MockPostRepository`]
//! - [`MockRegistrationRepository`]

mod post;
mod registration;
mod session;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod post_mock;
#[cfg(any(test, feature = "mocks"))]
mod registration_mock;
#[cfg(any(test, feature = "mocks"))]
mod session_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use post::{Post, PostRepository, PostView};
pub use registration::RegistrationRepository;
pub use session::{NewSession, SessionRecord, SessionRepository};
pub use user::{Author, User, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use post_mock::MockPostRepository;
#[cfg(any(test, feature = "mocks"))]
pub use registration_mock::MockRegistrationRepository;
#[cfg(any(test, feature = "mocks"))]
pub use session_mock::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
