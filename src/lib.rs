pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod validation;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    BoxError, Router,
};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::{
    ArticleRepository, ArticleStore, DatabaseManager, MemoryArticleStore, MemoryUserStore,
    PgArticleStore, PgUserStore, UserStore,
};
use crate::error::ApiError;
use crate::middleware::jwt_auth_middleware;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub articles: ArticleRepository,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        articles: Arc<dyn ArticleStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            articles: ArticleRepository::new(articles),
            users,
        }
    }

    /// Process-local stores; contents are lost on exit
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryArticleStore::new()),
            Arc::new(MemoryUserStore::new()),
        )
    }

    pub fn postgres(config: AppConfig, manager: DatabaseManager) -> Self {
        Self::new(
            config,
            Arc::new(PgArticleStore::new(manager.clone())),
            Arc::new(PgUserStore::new(manager)),
        )
    }
}

/// Build the full router: protected article routes, public account routes,
/// the health check and the 404 fallback.
pub fn app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let enable_cors = state.config.security.enable_cors;

    let router = Router::new()
        .merge(article_routes().route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware)))
        .merge(public_routes())
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout)),
        );

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Serve the router until `shutdown` resolves, then finish in-flight requests
pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Errors raised by the tower stack, outside any handler
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request timed out");
        ApiError::internal("Request timed out")
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        ApiError::internal(err.to_string())
    }
}

fn article_routes() -> Router<AppState> {
    use handlers::protected::article;

    Router::new()
        .route("/api/article", post(article::article_post).get(article::article_get))
        .route(
            "/api/article/:id",
            put(article::article_put).delete(article::article_delete),
        )
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/api/user", post(public::register_post))
        .route("/api/auth/login", post(public::login_post))
        .route("/health", get(public::health_get))
}
