mod common;

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use tokio::sync::oneshot;

use article_api::config::AppConfig;
use article_api::AppState;

#[tokio::test]
async fn shutdown_signal_stops_the_server() -> Result<()> {
    let (stop, stopped) = oneshot::channel::<()>();
    let state = AppState::in_memory(AppConfig::for_tests(common::TEST_SECRET));
    let (server, handle) = common::spawn_until(state, async move {
        let _ = stopped.await;
    })
    .await?;

    let res = server.create_article("Pen", "Bic").await?;
    assert_eq!(res.status(), StatusCode::OK);

    let _ = stop.send(());
    let outcome = tokio::time::timeout(Duration::from_secs(5), handle).await?;
    assert!(outcome?.is_ok());

    let client = reqwest::Client::new();
    assert!(client.get(server.url("/health")).send().await.is_err());
    Ok(())
}
