//! axum HTTP surface: session-cookie auth endpoints and the JSON blog API.
//!
//! ```rust,ignore
//! use quill::api::axum::{AppState, router};
//! use quill::sqlite;
//!
//! let pool = sqlite::connect(&config.database_url).await?;
//! sqlite::migrations::run(&pool).await?;
//! let (users, sessions, posts, registration) = sqlite::create_repositories(pool);
//! let app = router(AppState::new(users, posts, sessions, registration, config));
//! ```

mod error;
mod handlers;
mod middleware;
mod routes;

pub use error::AppError;
pub use middleware::{SessionToken, extract_session_token};
pub use routes::{AppState, auth_routes, blog_routes, router};
