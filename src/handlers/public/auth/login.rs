// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::{generate_jwt, verify_password, Claims};
use crate::error::{ApiError, ApiResult};
use crate::handlers::{body_value, validate};
use crate::validation::{rules::LOGIN, RequestInput};
use crate::AppState;

/// POST /api/auth/login - Exchange username and password for a bearer token
///
/// Input: `{ "username": "string", "password": "string" }`
///
/// Output: `{ "token": "eyJhbGciOiJIUzI1NiI..." }`
///
/// Unknown users and wrong passwords get the same 401.
pub async fn login_post(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let input = RequestInput::new().with_body(body_value(body));
    let validated = validate(&LOGIN, &input)?;

    let username = validated.body("username").unwrap_or_default();
    let password = validated.body("password").unwrap_or_default();

    let Some(user) = state.users.find_by_username(username).await? else {
        tracing::warn!("Failed login for unknown user {}", username);
        return Err(ApiError::InvalidLogin);
    };

    let attempt = password.to_string();
    let stored = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&attempt, &stored))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !verified {
        tracing::warn!("Failed login for {}", username);
        return Err(ApiError::InvalidLogin);
    }

    let security = &state.config.security;
    let claims = Claims::new(
        user.id.to_string(),
        Some(user.username.clone()),
        security.jwt_expiry_hours,
    );
    let token = generate_jwt(&claims, &security.jwt_secret)?;

    tracing::info!("User {} logged in", user.username);
    Ok(Json(json!({ "token": token })))
}
