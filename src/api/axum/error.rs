use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::BlogError;
use crate::api::ErrorResponse;

/// Converts `BlogError` into an HTTP response with a `{error, code}` body.
#[derive(Debug)]
pub struct AppError(pub BlogError);

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        Self(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BlogError::NotFound(_) => StatusCode::NOT_FOUND,
            BlogError::Unauthorized => StatusCode::FORBIDDEN,
            BlogError::InvalidSession | BlogError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            BlogError::Conflict(_) => StatusCode::CONFLICT,
            BlogError::ForeignKeyViolation => StatusCode::UNPROCESSABLE_ENTITY,
            BlogError::Validation(_) => StatusCode::BAD_REQUEST,
            BlogError::PasswordHash | BlogError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(target: "quill::http", "msg=\"request failed\", error=\"{}\"", self.0);
        }

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
