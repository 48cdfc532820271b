mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn new_user() -> Value {
    json!({
        "username": "jdoe",
        "password": "secret123",
        "name": "John",
        "lastname": "Doe",
        "dni": "12345678"
    })
}

async fn post(server: &common::TestServer, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
    let res = server.client.post(server.url(path)).json(body).send().await?;
    let status = res.status();
    Ok((status, res.json().await?))
}

#[tokio::test]
async fn register_hides_password() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = post(&server, "/api/user", &new_user()).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "New user created successfully");
    assert_eq!(body["results"]["username"], "jdoe");
    assert!(body["results"].get("password_hash").is_none());
    assert!(body["results"].get("passwordHash").is_none());
    assert!(body["results"].get("password").is_none());
    assert!(body["results"]["createdAt"].is_string());
    assert!(body["results"].get("created_at").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_forbidden() -> Result<()> {
    let server = common::spawn_server().await?;
    post(&server, "/api/user", &new_user()).await?;

    let (status, body) = post(&server, "/api/user", &new_user()).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({ "error": "Duplicate entry 'jdoe' for key 'users.username'" })
    );
    Ok(())
}

#[tokio::test]
async fn register_requires_every_field() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = post(&server, "/api/user", &json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let paths: Vec<&str> = body["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e["path"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(paths, vec!["username", "password", "name", "lastname", "dni"]);
    Ok(())
}

#[tokio::test]
async fn login_returns_usable_token() -> Result<()> {
    let server = common::spawn_server().await?;
    post(&server, "/api/user", &new_user()).await?;

    let (status, body) = post(
        &server,
        "/api/auth/login",
        &json!({ "username": "jdoe", "password": "secret123" }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let res = server
        .client
        .get(server.url("/api/article"))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    post(&server, "/api/user", &new_user()).await?;

    let (status, body) = post(
        &server,
        "/api/auth/login",
        &json!({ "username": "jdoe", "password": "wrong-one" }),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid username or password." }));
    Ok(())
}

#[tokio::test]
async fn unknown_user_gets_same_rejection() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = post(
        &server,
        "/api/auth/login",
        &json!({ "username": "ghost", "password": "whatever" }),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid username or password." }));
    Ok(())
}

#[tokio::test]
async fn login_requires_credentials() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = post(&server, "/api/auth/login", &json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
    Ok(())
}
