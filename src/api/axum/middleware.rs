use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use super::routes::AppState;
use crate::session::session_token_from_cookie_header;

/// The session token from the request's cookies, if any.
///
/// Never rejects: whether a missing token is an error is up to the handler.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Reads `cookie_name` from every `Cookie` header on the request.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| session_token_from_cookie_header(header, cookie_name))
}

impl<U, P, S, R> FromRequestParts<AppState<U, P, S, R>> for SessionToken
where
    U: Send + Sync,
    P: Send + Sync,
    S: Send + Sync,
    R: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, P, S, R>,
    ) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(extract_session_token(
            &parts.headers,
            &state.config.session.cookie_name,
        )))
    }
}
