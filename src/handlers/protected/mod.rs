// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here is mounted behind `jwt_auth_middleware`, so handlers can
// rely on an `Identity` in the request extensions.

pub mod article;

pub use article::{article_delete, article_get, article_post, article_put};
