use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use article_api::config::{config, AppConfig};
use article_api::database::DatabaseManager;
use article_api::{is_production, serve, AppState};

#[derive(Parser, Debug)]
#[command(name = "article-api", version, about = "Article inventory HTTP API")]
struct Args {
    /// Port to listen on (overrides PORT / ARTICLE_API_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Keep everything in memory even when DATABASE_URL is set
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so DATABASE_URL and JWT_SECRET are picked up locally
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config: AppConfig = config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting Article API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        if is_production!() {
            bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("JWT_SECRET is empty, tokens cannot be issued or verified");
    } else if config.security.uses_development_secret() {
        if is_production!() {
            bail!("JWT_SECRET must not be the development default in production");
        }
        tracing::warn!("JWT_SECRET is the development default, set JWT_SECRET before deploying");
    }

    let (state, database) = match (&config.database.url, args.memory) {
        (Some(_), false) => {
            let manager = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to the database")?;
            manager
                .ensure_schema()
                .await
                .context("failed to prepare the database schema")?;
            (AppState::postgres(config.clone(), manager.clone()), Some(manager))
        }
        _ => {
            tracing::info!("Using the in-memory store");
            (AppState::in_memory(config.clone()), None)
        }
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Article API listening on http://{}", bind_addr);

    serve(listener, state, shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = database {
        manager.close().await;
    }
    tracing::info!("Article API stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(e) => {
            // Without a signal handler, keep serving until killed
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
