// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, account registration and the liveness check.

pub mod auth;
pub mod health;

pub use auth::{login_post, register_post};
pub use health::health_get;
