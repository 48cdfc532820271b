use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseManager;
use crate::database::models::article::duplicate_article_key;
use crate::database::models::user::duplicate_username_key;
use crate::database::models::{Article, ArticleChanges, NewUser, User};
use crate::database::query_builder;
use crate::database::repository::RepositoryError;
use crate::database::store::{ArticleStore, UserStore};
use crate::filter::FilterSpec;

const ARTICLE_TABLE: &str = "article";
const ARTICLE_COLUMNS: &[&str] = &["id", "name", "brand", "active", "updated_at"];

const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation_code(code: Option<&str>) -> bool {
    code == Some(UNIQUE_VIOLATION)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => is_unique_violation_code(db.code().as_deref()),
        _ => false,
    }
}

fn internal(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Internal(err.to_string())
}

/// Unique violations become `DuplicateKey` with the given message, anything else is internal
fn classify(err: sqlx::Error, duplicate_key: impl FnOnce() -> String) -> RepositoryError {
    if is_unique_violation(&err) {
        RepositoryError::DuplicateKey(duplicate_key())
    } else {
        internal(err)
    }
}

/// Pair reported when the stored row cannot be re-read
fn fallback_pair(changes: &ArticleChanges) -> (String, String) {
    (
        changes.name.clone().unwrap_or_default(),
        changes.brand.clone().unwrap_or_default(),
    )
}

pub struct PgArticleStore {
    manager: DatabaseManager,
}

impl PgArticleStore {
    pub fn new(manager: DatabaseManager) -> Self {
        Self { manager }
    }

    fn pool(&self) -> &PgPool {
        self.manager.pool()
    }

    /// The pair an update would have produced, for the duplicate message
    async fn attempted_pair(&self, id: i64, changes: &ArticleChanges) -> (String, String) {
        let stored: Option<(String, String)> = sqlx::query_as(
            r#"SELECT COALESCE($2, "name"), COALESCE($3, "brand") FROM "article" WHERE "id" = $1"#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.brand.as_deref())
        .fetch_optional(self.pool())
        .await
        .ok()
        .flatten();

        stored.unwrap_or_else(|| fallback_pair(changes))
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn insert(&self, name: &str, brand: &str) -> Result<Article, RepositoryError> {
        sqlx::query_as::<_, Article>(
            r#"INSERT INTO "article" ("name", "brand", "active", "updated_at")
               VALUES ($1, $2, TRUE, now())
               RETURNING "id", "name", "brand", "active", "updated_at""#,
        )
        .bind(name)
        .bind(brand)
        .fetch_one(self.pool())
        .await
        .map_err(|err| classify(err, || duplicate_article_key(name, brand)))
    }

    async fn find_page(&self, filter: &FilterSpec) -> Result<(Vec<Article>, i64), RepositoryError> {
        let select = filter.to_sql(ARTICLE_TABLE, ARTICLE_COLUMNS);
        let count = filter.to_count_sql(ARTICLE_TABLE);
        tracing::debug!("Article page query: {}", select.query);

        let rows = query_builder::select_all::<Article>(self.pool(), &select)
            .await
            .map_err(internal)?;
        let total = query_builder::count(self.pool(), &count)
            .await
            .map_err(internal)?;

        Ok((rows, total))
    }

    async fn update(&self, id: i64, changes: &ArticleChanges) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE "article"
               SET "name" = COALESCE($2, "name"),
                   "brand" = COALESCE($3, "brand"),
                   "active" = COALESCE($4, "active"),
                   "updated_at" = now()
               WHERE "id" = $1"#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.brand.as_deref())
        .bind(changes.active)
        .execute(self.pool())
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected()),
            Err(err) if is_unique_violation(&err) => {
                let (name, brand) = self.attempted_pair(id, changes).await;
                Err(RepositoryError::DuplicateKey(duplicate_article_key(&name, &brand)))
            }
            Err(err) => Err(internal(err)),
        }
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(self.manager.health_check().await?)
    }
}

pub struct PgUserStore {
    manager: DatabaseManager,
}

impl PgUserStore {
    pub fn new(manager: DatabaseManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO "users" ("username", "name", "lastname", "dni", "password_hash")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING *"#,
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.lastname)
        .bind(&user.dni)
        .bind(&user.password_hash)
        .fetch_one(self.manager.pool())
        .await
        .map_err(|err| classify(err, || duplicate_username_key(&user.username)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, User>(r#"SELECT * FROM "users" WHERE "username" = $1"#)
            .bind(username)
            .fetch_optional(self.manager.pool())
            .await
            .map_err(internal)
    }
}
