use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::database::ArticlePage;
use crate::error::ApiResult;
use crate::filter::FilterSpec;
use crate::handlers::validate;
use crate::validation::{rules::LIST_ARTICLES, RequestInput};
use crate::AppState;

/// GET /api/article - Page through articles
///
/// Query: `page`, `order` (ASC|DESC), `name` (up to 10 chars), `exact` and
/// `active` (true|false). Pages hold 20 rows ordered by name, then id.
pub async fn article_get(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<ArticlePage>> {
    let input = RequestInput::new().with_query(query);
    let validated = validate(&LIST_ARTICLES, &input)?;

    let filter = FilterSpec::from_query(&validated);
    tracing::debug!("Listing articles with {:?}", filter);

    Ok(Json(state.articles.list(&filter).await?))
}
