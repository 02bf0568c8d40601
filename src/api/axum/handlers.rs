//! HTTP handlers for the axum surface.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;

use super::error::AppError;
use super::middleware::SessionToken;
use super::routes::AppState;
use crate::actions::{CurrentUserAction, LoginAction, LogoutAction, RegisterAction};
use crate::api::{
    AuthResponse, CreatePostRequest, LoginRequest, MessageResponse, PublicIdentity,
    RegisterRequest, UserProfile,
};
use crate::session::{build_removal_cookie, build_session_cookie};
use crate::{PostRepository, PostView, RegistrationRepository, SessionRepository, UserRepository};

/// Register a new user and start their session.
///
/// POST /register
pub async fn register<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    let action = RegisterAction::new(
        state.api.credentials().clone(),
        state.registration.clone(),
        state.api.guard().sessions().clone(),
        state.config.password_policy.clone(),
    )
    .with_timeout(state.config.store_timeout);

    let (user, token) = action
        .execute(&body.username, &body.password, &body.confirm_password)
        .await?;
    let cookie = build_session_cookie(token, &state.config.session);

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie.to_string())],
        Json(AuthResponse::new(&user, "Registration successful")),
    ))
}

/// Authenticate and start a session.
///
/// POST /login
pub async fn login<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    let action = LoginAction::new(
        state.api.credentials().clone(),
        state.api.guard().sessions().clone(),
    )
        .with_timeout(state.config.store_timeout);

    let (user, token) = action.execute(&body.username, &body.password).await?;
    let cookie = build_session_cookie(token, &state.config.session);

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie.to_string())],
        Json(AuthResponse::new(&user, "Login successful")),
    ))
}

/// End the current session, if any, and clear the cookie.
///
/// POST /logout
pub async fn logout<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    token: SessionToken,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    LogoutAction::new(state.api.guard().sessions().clone())
        .with_timeout(state.config.store_timeout)
        .execute(token.as_deref())
        .await?;

    let cookie = build_removal_cookie(&state.config.session);
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie.to_string())],
        Json(MessageResponse {
            message: "Logged out successfully".to_owned(),
        }),
    ))
}

/// GET /api/current-user
pub async fn current_user<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    token: SessionToken,
) -> Result<Json<PublicIdentity>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    let identity = CurrentUserAction::new(state.api.guard().clone(), state.users.clone())
        .with_timeout(state.config.store_timeout)
        .execute(token.as_deref())
        .await?;

    Ok(Json(identity))
}

/// GET /api/users/{id}
pub async fn get_user<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    token: SessionToken,
    Path(id): Path<i64>,
) -> Result<Json<UserProfile>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(state.api.get_user(token.as_deref(), id).await?))
}

/// GET /api/posts/{id}
pub async fn get_post<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    Path(id): Path<i64>,
) -> Result<Json<PostView>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(state.api.get_post(id).await?))
}

/// GET /api/posts
pub async fn get_all_posts<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
) -> Result<Json<Vec<PostView>>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(state.api.get_all_posts().await?))
}

/// GET /api/users/{id}/posts
pub async fn get_users_posts<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<PostView>>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(state.api.get_users_posts(id).await?))
}

/// POST /api/posts
pub async fn create_post<U, P, S, R>(
    State(state): State<AppState<U, P, S, R>>,
    token: SessionToken,
    Json(body): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    R: RegistrationRepository + Clone + Send + Sync + 'static,
{
    let post = state
        .api
        .create_post(token.as_deref(), &body.title, &body.content, body.author_id)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}
