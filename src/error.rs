use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with, mapped onto a transport status and a
/// `{"detail": ...}` body. Expected domain failures keep their own variant;
/// infrastructure failures collapse into `Internal` and are logged, not leaked.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    TokenInvalid,
    #[error("Token expired")]
    TokenExpired,
    #[error("Not authenticated")]
    Unauthorized,
    #[error("User not found")]
    UserNotFound,
    #[error("Already in list")]
    AlreadyInList,
    #[error("Item not found in list")]
    NotInList,
    #[error("Movie not found")]
    MovieNotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmailTaken | ApiError::AlreadyInList | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials
            | ApiError::TokenInvalid
            | ApiError::TokenExpired
            | ApiError::Unauthorized
            | ApiError::UserNotFound => StatusCode::UNAUTHORIZED,
            ApiError::NotInList | ApiError::MovieNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_failures_map_to_4xx() {
        assert_eq!(ApiError::EmailTaken.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AlreadyInList.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotInList.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MovieNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_failures_are_401_with_distinct_messages() {
        for err in [
            ApiError::InvalidCredentials,
            ApiError::TokenInvalid,
            ApiError::TokenExpired,
            ApiError::Unauthorized,
            ApiError::UserNotFound,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
        assert_ne!(
            ApiError::TokenInvalid.to_string(),
            ApiError::TokenExpired.to_string()
        );
        assert_ne!(
            ApiError::TokenInvalid.to_string(),
            ApiError::UserNotFound.to_string()
        );
    }

    #[test]
    fn internal_errors_are_500() {
        let err = ApiError::Internal(anyhow::anyhow!("pool exhausted"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
