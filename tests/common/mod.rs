#![allow(dead_code)]

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use article_api::auth::{generate_jwt, Claims};
use article_api::config::AppConfig;
use article_api::{serve, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// A router on its own port with a fresh in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// POST /api/article with a valid token
    pub async fn create_article(&self, name: &str, brand: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/article"))
            .bearer_auth(token())
            .json(&json!({ "name": name, "brand": brand }))
            .send()
            .await?)
    }

    /// GET /api/article with a valid token, returning status and body
    pub async fn list_articles(&self, query: &str) -> Result<(StatusCode, Value)> {
        let resp = self
            .client
            .get(self.url(&format!("/api/article{}", query)))
            .bearer_auth(token())
            .send()
            .await?;
        let status = resp.status();
        Ok((status, resp.json().await?))
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_with_state(AppState::in_memory(AppConfig::for_tests(TEST_SECRET))).await
}

/// Serve a caller-built state, for custom stores or config
pub async fn spawn_with_state(state: AppState) -> Result<TestServer> {
    let (server, _handle) = spawn_until(state, std::future::pending()).await?;
    Ok(server)
}

/// Serve until `shutdown` resolves; the handle yields the serve result
pub async fn spawn_until<F>(
    state: AppState,
    shutdown: F,
) -> Result<(TestServer, JoinHandle<std::io::Result<()>>)>
where
    F: Future<Output = ()> + Send + 'static,
{
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test port")?;

    let handle = tokio::spawn(serve(listener, state, shutdown));

    let server = TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        client: Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok((server, handle))
}

/// Token signed with the test secret, valid for an hour
pub fn token() -> String {
    let claims = Claims::new("1", Some("tester".to_string()), 1);
    generate_jwt(&claims, TEST_SECRET).expect("failed to sign test token")
}

/// Server seeded with the given `(name, brand)` pairs, ids assigned in order
pub async fn seeded_server(articles: &[(&str, &str)]) -> Result<TestServer> {
    let server = spawn_server().await?;
    for (name, brand) in articles {
        let resp = server.create_article(name, brand).await?;
        anyhow::ensure!(resp.status() == StatusCode::OK, "seeding {} failed", name);
    }
    Ok(server)
}
