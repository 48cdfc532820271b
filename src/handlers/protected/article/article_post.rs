use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::auth::Identity;
use crate::error::ApiResult;
use crate::handlers::{body_value, validate};
use crate::validation::{rules::CREATE_ARTICLE, RequestInput};
use crate::AppState;

/// POST /api/article - Create an active article
///
/// Input: `{ "name": "string", "brand": "string" }`. Both are trimmed,
/// restricted to letters, digits and ` -,.():`, 1 to 50 characters.
///
/// Output: `{ "message": "...", "results": Article }`. A `(name, brand)` pair
/// already present in any row, active or not, is a 403.
pub async fn article_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let input = RequestInput::new().with_body(body_value(body));
    let validated = validate(&CREATE_ARTICLE, &input)?;

    let name = validated.body("name").unwrap_or_default();
    let brand = validated.body("brand").unwrap_or_default();

    let article = state.articles.create(name, brand).await?;
    tracing::info!("Article {} created by {}", article.id, identity.subject);

    Ok(Json(json!({
        "message": "New article created succesfully",
        "results": article,
    })))
}
