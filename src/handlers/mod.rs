// handlers/mod.rs - Route handlers, split by security tier
//
// Public (no auth): /api/user, /api/auth/login, /health
// Protected (JWT auth): /api/article, /api/article/:id

pub mod protected;
pub mod public;

use axum::{http::Uri, Json};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::validation::{RequestInput, Validated, ValidationChain};

/// Body as handed over by axum; anything that is not a JSON object reads as `{}`
pub(crate) fn body_value(body: Option<Json<Value>>) -> Value {
    body.map(|Json(value)| value).unwrap_or(Value::Null)
}

/// Run a chain and turn violations into a 400
pub(crate) fn validate(chain: &ValidationChain, input: &RequestInput) -> ApiResult<Validated> {
    chain.run(input).map_err(|violations| {
        tracing::debug!("Request rejected with {} violation(s)", violations.len());
        ApiError::ValidationFailed(violations)
    })
}

/// Fallback for every unmatched path
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!("No route for {}", uri.path());
    ApiError::UnknownPath
}
