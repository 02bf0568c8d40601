use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use crate::api::BlogApi;
use crate::config::BlogConfig;
use crate::{PostRepository, RegistrationRepository, SessionRepository, UserRepository};

/// Everything the handlers need, cloned per request.
///
/// The auth handlers reuse the façade's credential store and session
/// manager, so there is one dummy-hash cache per application.
#[derive(Clone)]
pub struct AppState<U, P, S, R> {
    pub api: BlogApi<U, P, S>,
    pub registration: R,
    pub users: U,
    pub config: Arc<BlogConfig>,
}

impl<U, P, S, R> AppState<U, P, S, R>
where
    U: UserRepository + Clone,
    P: PostRepository,
    S: SessionRepository,
    R: RegistrationRepository,
{
    pub fn new(users: U, posts: P, sessions: S, registration: R, config: BlogConfig) -> Self {
        let api = BlogApi::from_repositories(users.clone(), posts, sessions, &config);
        Self {
            api,
            registration,
            users,
            config: Arc::new(config),
        }
    }
}

/// Login, logout, registration and the current-identity endpoint.
pub fn auth_routes<U, P, S, R>() -> Router<AppState<U, P, S, R>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<U, P, S, R>))
        .route("/logout", post(handlers::logout::<U, P, S, R>))
        .route("/register", post(handlers::register::<U, P, S, R>))
        .route(
            "/api/current-user",
            get(handlers::current_user::<U, P, S, R>),
        )
}

/// The JSON read/write API.
pub fn blog_routes<U, P, S, R>() -> Router<AppState<U, P, S, R>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/users/{id}", get(handlers::get_user::<U, P, S, R>))
        .route(
            "/api/users/{id}/posts",
            get(handlers::get_users_posts::<U, P, S, R>),
        )
        .route(
            "/api/posts",
            get(handlers::get_all_posts::<U, P, S, R>).post(handlers::create_post::<U, P, S, R>),
        )
        .route("/api/posts/{id}", get(handlers::get_post::<U, P, S, R>))
}

/// Both route sets with `state` attached.
pub fn router<U, P, S, R>(state: AppState<U, P, S, R>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(auth_routes())
        .merge(blog_routes())
        .with_state(state)
}
