use async_trait::async_trait;

use crate::database::models::{Article, ArticleChanges, NewUser, User};
use crate::database::repository::RepositoryError;
use crate::filter::FilterSpec;

/// Persistence contract for articles. Implementations must make the
/// `(name, brand)` uniqueness check and the write a single atomic step.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert an active article, `DuplicateKey` when the pair exists in any row
    async fn insert(&self, name: &str, brand: &str) -> Result<Article, RepositoryError>;

    /// One page of matching rows plus the total number of matches
    async fn find_page(&self, filter: &FilterSpec) -> Result<(Vec<Article>, i64), RepositoryError>;

    /// Apply the supplied columns and refresh `updated_at`. Returns affected rows.
    async fn update(&self, id: i64, changes: &ArticleChanges) -> Result<u64, RepositoryError>;

    async fn health_check(&self) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
}
