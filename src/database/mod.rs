pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryArticleStore, MemoryUserStore};
pub use postgres::{PgArticleStore, PgUserStore};
pub use repository::{ArticleRepository, ArticlePage, RepositoryError};
pub use store::{ArticleStore, UserStore};
