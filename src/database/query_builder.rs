use sqlx::{self, postgres::PgArguments, FromRow, PgPool, Row};

use crate::filter::{SqlParam, SqlResult};

type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, PgArguments>;
type PgQueryAs<'q, O> = sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>;

/// Run a rendered SELECT and map every row
pub async fn select_all<T>(pool: &PgPool, sql_result: &SqlResult) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let mut q = sqlx::query_as::<_, T>(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query_as(q, p);
    }
    q.fetch_all(pool).await
}

/// Run a rendered `SELECT COUNT(*) AS count`
pub async fn count(pool: &PgPool, sql_result: &SqlResult) -> Result<i64, sqlx::Error> {
    let mut q = sqlx::query(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query(q, p);
    }
    let row = q.fetch_one(pool).await?;
    row.try_get("count")
}

fn bind_param_query<'q>(q: PgQuery<'q>, p: &'q SqlParam) -> PgQuery<'q> {
    match p {
        SqlParam::Bool(b) => q.bind(*b),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}

fn bind_param_query_as<'q, O>(q: PgQueryAs<'q, O>, p: &'q SqlParam) -> PgQueryAs<'q, O>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match p {
        SqlParam::Bool(b) => q.bind(*b),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}
