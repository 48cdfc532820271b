// handlers/public/auth/register.rs - POST /api/user handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::hash_password;
use crate::database::models::NewUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{body_value, validate};
use crate::validation::{rules::REGISTER_USER, RequestInput};
use crate::AppState;

/// POST /api/user - Register a new account
///
/// Input: `{ "username", "password", "name", "lastname", "dni" }`, all required.
/// The password is stored as a bcrypt hash and never returned.
pub async fn register_post(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let input = RequestInput::new().with_body(body_value(body));
    let validated = validate(&REGISTER_USER, &input)?;

    let password = validated.body("password").unwrap_or_default().to_string();
    let cost = state.config.security.bcrypt_cost;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))??;

    let field = |name: &str| validated.body(name).unwrap_or_default().to_string();
    let new_user = NewUser {
        username: field("username"),
        name: field("name"),
        lastname: field("lastname"),
        dni: field("dni"),
        password_hash,
    };

    let user = state.users.create(new_user).await?;
    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok(Json(json!({
        "message": "New user created successfully",
        "results": user,
    })))
}
