use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::{Article, ArticleChanges};
use crate::database::store::ArticleStore;
use crate::filter::FilterSpec;

/// Store failures, classified at the repository boundary
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    DuplicateKey(String),

    #[error("There is no Article registered with id {0}.")]
    NotFound(i64),

    #[error("{0}")]
    Internal(String),
}

impl From<DatabaseError> for RepositoryError {
    fn from(err: DatabaseError) -> Self {
        RepositoryError::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub total_items: i64,
    pub total_pages: i64,
    pub results: Vec<Article>,
}

/// Article operations over any [`ArticleStore`]
#[derive(Clone)]
pub struct ArticleRepository {
    store: Arc<dyn ArticleStore>,
}

impl ArticleRepository {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, name: &str, brand: &str) -> Result<Article, RepositoryError> {
        let article = self.store.insert(name, brand).await?;
        tracing::debug!("Created article {}", article.id);
        Ok(article)
    }

    pub async fn list(&self, filter: &FilterSpec) -> Result<ArticlePage, RepositoryError> {
        let (results, total_items) = self.store.find_page(filter).await?;
        Ok(ArticlePage {
            total_items,
            total_pages: FilterSpec::total_pages(total_items),
            results,
        })
    }

    pub async fn update(&self, id: i64, changes: &ArticleChanges) -> Result<(), RepositoryError> {
        match self.store.update(id, changes).await? {
            0 => Err(RepositoryError::NotFound(id)),
            _ => Ok(()),
        }
    }

    /// Soft delete: the row stays, `active` becomes false
    pub async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.update(id, &ArticleChanges::deactivate()).await
    }

    pub async fn health_check(&self) -> Result<(), RepositoryError> {
        self.store.health_check().await
    }
}
