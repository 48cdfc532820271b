use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub dni: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Registration data, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub dni: String,
    pub password_hash: String,
}

pub fn duplicate_username_key(username: &str) -> String {
    format!("Duplicate entry '{}' for key 'users.username'", username)
}
