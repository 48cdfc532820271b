// handlers/protected/article/mod.rs - Article resource

pub mod article_delete; // DELETE /api/article/:id - soft delete
pub mod article_get;    // GET /api/article - filtered, paginated listing
pub mod article_post;   // POST /api/article - create
pub mod article_put;    // PUT /api/article/:id - partial update

pub use article_delete::article_delete;
pub use article_get::article_get;
pub use article_post::article_post;
pub use article_put::article_put;

use axum::extract::{rejection::PathRejection, Path};
use axum::http::Uri;

use crate::error::{ApiError, ApiResult};
use crate::validation::Validated;

/// The `:id` segment as text. An id that does not percent-decode to UTF-8
/// is passed on raw so the validation chain reports it like any other bad id.
pub(crate) fn raw_id(path: Result<Path<String>, PathRejection>, uri: &Uri) -> String {
    match path {
        Ok(Path(id)) => id,
        Err(rejection) => {
            tracing::debug!("Undecodable article id in {}: {}", uri.path(), rejection);
            uri.path().rsplit('/').next().unwrap_or_default().to_string()
        }
    }
}

/// Path id after validation has confirmed it is an integer
pub(crate) fn article_id(validated: &Validated) -> ApiResult<i64> {
    validated
        .param("id")
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or_else(|| ApiError::internal("validated id is not an integer"))
}
