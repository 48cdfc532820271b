// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::AuthError;
use crate::database::RepositoryError;
use crate::validation::Violation;

/// Every failure that may reach a client. The mapping to status codes and
/// body shapes below is total; nothing else is allowed out of a handler.
///
/// The body key differs by origin (`message` for credentials, `errors` for
/// validation, `error` for store failures). Clients depend on it, keep it.
#[derive(Debug, Error)]
pub enum ApiError {
    // 401 Unauthorized
    #[error("The JWT is required.")]
    MissingCredential,

    #[error("Invalid Token. Please login again.")]
    InvalidCredential,

    #[error("Invalid username or password.")]
    InvalidLogin,

    // 400 Bad Request
    #[error("{} validation error(s)", .0.len())]
    ValidationFailed(Vec<Violation>),

    // 403 Forbidden
    #[error("{0}")]
    DuplicateKey(String),

    // 404 Not Found
    #[error("There is no Article registered with id {0}.")]
    NotFound(i64),

    #[error("This path doesn't exist.")]
    UnknownPath,

    // 500 Internal Server Error
    #[error("{0}")]
    InternalFailure(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredential | ApiError::InvalidCredential | ApiError::InvalidLogin => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateKey(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) | ApiError::UnknownPath => StatusCode::NOT_FOUND,
            ApiError::InternalFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::MissingCredential
            | ApiError::InvalidCredential
            | ApiError::InvalidLogin
            | ApiError::UnknownPath => json!({ "message": self.to_string() }),
            ApiError::ValidationFailed(violations) => json!({ "errors": violations }),
            ApiError::DuplicateKey(_) | ApiError::NotFound(_) | ApiError::InternalFailure(_) => {
                json!({ "error": self.to_string() })
            }
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::InternalFailure(message.into())
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        ApiError::ValidationFailed(violations)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingHeader => ApiError::MissingCredential,
            AuthError::MalformedHeader | AuthError::InvalidToken(_) => ApiError::InvalidCredential,
            AuthError::InvalidSecret => {
                tracing::error!("JWT secret is not configured");
                ApiError::internal("JWT secret is not configured")
            }
            AuthError::TokenGeneration(msg) => {
                tracing::error!("JWT generation error: {}", msg);
                ApiError::internal(msg)
            }
            AuthError::PasswordHash(msg) => {
                tracing::error!("Password hashing error: {}", msg);
                ApiError::internal("Password hashing failed")
            }
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateKey(key) => ApiError::DuplicateKey(key),
            RepositoryError::NotFound(id) => ApiError::NotFound(id),
            RepositoryError::Internal(msg) => {
                tracing::error!("Repository error: {}", msg);
                ApiError::InternalFailure(msg)
            }
        }
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
