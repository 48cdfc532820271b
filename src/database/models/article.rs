use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleChanges {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub active: Option<bool>,
}

impl ArticleChanges {
    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            ..Default::default()
        }
    }
}

/// Key text reported when `(name, brand)` collides
pub fn duplicate_article_key(name: &str, brand: &str) -> String {
    format!("Duplicate entry '{}-{}' for key 'article.name-brand'", name, brand)
}
