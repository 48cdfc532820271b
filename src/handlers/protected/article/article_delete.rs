use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    Json,
};
use serde_json::{json, Value};

use super::{article_id, raw_id};
use crate::error::ApiResult;
use crate::handlers::validate;
use crate::validation::{rules::ARTICLE_BY_ID, RequestInput};
use crate::AppState;

/// DELETE /api/article/:id - Soft delete; the row stays with `active = false`
pub async fn article_delete(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let input = RequestInput::new().with_param("id", raw_id(path, &uri));
    let validated = validate(&ARTICLE_BY_ID, &input)?;
    let id = article_id(&validated)?;

    state.articles.deactivate(id).await?;
    tracing::info!("Article {} set inactive", id);

    Ok(Json(json!({
        "message": format!("Article with id {} has been set as inactive successfully.", id),
    })))
}
