use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    Json,
};
use serde_json::{json, Value};

use super::{article_id, raw_id};
use crate::database::models::ArticleChanges;
use crate::error::ApiResult;
use crate::handlers::{body_value, validate};
use crate::validation::{rules::UPDATE_ARTICLE, RequestInput};
use crate::AppState;

/// PUT /api/article/:id - Change name and/or brand
///
/// Fields left out of the body keep their value. An unknown id is a 404, a
/// change that collides with another row's `(name, brand)` is a 403.
pub async fn article_put(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    body: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let input = RequestInput::new()
        .with_param("id", raw_id(path, &uri))
        .with_body(body_value(body));
    let validated = validate(&UPDATE_ARTICLE, &input)?;
    let id = article_id(&validated)?;

    let changes = ArticleChanges {
        name: validated.body("name").map(str::to_string),
        brand: validated.body("brand").map(str::to_string),
        active: None,
    };
    state.articles.update(id, &changes).await?;

    Ok(Json(json!({ "message": "Article updated successfully." })))
}
