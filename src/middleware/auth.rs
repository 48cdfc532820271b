use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{authenticate, AuthError, Identity};
use crate::error::ApiError;
use crate::AppState;

/// JWT authentication middleware that validates tokens and attaches the
/// caller's `Identity` to the request. Runs before any validation or store
/// work, so a rejected credential never reaches the handler.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity: Identity = authenticate(&headers, &state.config.security.jwt_secret)
        .map_err(|err| {
            match &err {
                AuthError::MissingHeader => {
                    tracing::debug!("{} {}: no credential", request.method(), request.uri().path())
                }
                other => tracing::warn!(
                    "{} {}: credential rejected: {}",
                    request.method(),
                    request.uri().path(),
                    other
                ),
            }
            ApiError::from(err)
        })?;

    tracing::debug!("Authenticated subject {}", identity.subject);
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
