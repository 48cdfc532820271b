//! In-process stores, used when no database is configured and by the tests.
//! Each write takes the lock once, so check-then-write cannot interleave.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::article::duplicate_article_key;
use crate::database::models::user::duplicate_username_key;
use crate::database::models::{Article, ArticleChanges, NewUser, User};
use crate::database::repository::RepositoryError;
use crate::database::store::{ArticleStore, UserStore};
use crate::filter::filter_order::FilterOrder;
use crate::filter::FilterSpec;

struct Table<T> {
    rows: Vec<T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryArticleStore {
    table: RwLock<Table<Article>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn insert(&self, name: &str, brand: &str) -> Result<Article, RepositoryError> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|a| a.name == name && a.brand == brand) {
            return Err(RepositoryError::DuplicateKey(duplicate_article_key(name, brand)));
        }

        let article = Article {
            id: table.next_id(),
            name: name.to_string(),
            brand: brand.to_string(),
            active: true,
            updated_at: Utc::now(),
        };
        table.rows.push(article.clone());
        Ok(article)
    }

    async fn find_page(&self, filter: &FilterSpec) -> Result<(Vec<Article>, i64), RepositoryError> {
        let table = self.table.read().await;

        let mut matching: Vec<&Article> = table.rows.iter().filter(|a| filter.matches(a)).collect();
        matching.sort_by(|a, b| FilterOrder::compare(a, b, filter.order));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(filter.offset()).unwrap_or(usize::MAX))
            .take(filter.limit() as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update(&self, id: i64, changes: &ArticleChanges) -> Result<u64, RepositoryError> {
        let mut table = self.table.write().await;

        let Some(index) = table.rows.iter().position(|a| a.id == id) else {
            return Ok(0);
        };

        let current = &table.rows[index];
        let name = changes.name.clone().unwrap_or_else(|| current.name.clone());
        let brand = changes.brand.clone().unwrap_or_else(|| current.brand.clone());

        let collides = table
            .rows
            .iter()
            .any(|a| a.id != id && a.name == name && a.brand == brand);
        if collides {
            return Err(RepositoryError::DuplicateKey(duplicate_article_key(&name, &brand)));
        }

        let article = &mut table.rows[index];
        article.name = name;
        article.brand = brand;
        if let Some(active) = changes.active {
            article.active = active;
        }
        article.updated_at = Utc::now();
        Ok(1)
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    table: RwLock<Table<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::DuplicateKey(duplicate_username_key(&user.username)));
        }

        let user = User {
            id: table.next_id(),
            username: user.username,
            name: user.name,
            lastname: user.lastname,
            dni: user.dni,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }
}
