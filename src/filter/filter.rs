use crate::database::models::Article;
use crate::validation::Validated;

use super::filter_order::FilterOrder;
use super::filter_where::{like_matches, like_pattern, FilterWhere};
use super::types::{SortDirection, SqlResult, PAGE_SIZE};

/// Resolved read request: ordering, page, name match and active flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub order: SortDirection,
    pub page: i64,
    /// LIKE pattern, `\` escapes
    pub name_pattern: String,
    pub match_exact: bool,
    pub active: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            order: SortDirection::Asc,
            page: 1,
            name_pattern: like_pattern("", false),
            match_exact: false,
            active: true,
        }
    }
}

impl FilterSpec {
    /// Build from the sanitized query of `GET /api/article`
    pub fn from_query(query: &Validated) -> Self {
        let order = query
            .query("order")
            .map(SortDirection::parse)
            .unwrap_or_default();

        let page = query
            .query("page")
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(1)
            .max(1);

        let match_exact = query.query("exact") == Some("true");
        let active = query.query("active") != Some("false");
        let name = query.query("name").unwrap_or("");

        Self {
            order,
            page,
            name_pattern: like_pattern(name, match_exact),
            match_exact,
            active,
        }
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn total_pages(total_items: i64) -> i64 {
        if total_items <= 0 {
            return 0;
        }
        (total_items + PAGE_SIZE - 1) / PAGE_SIZE
    }

    /// Row predicate, equivalent to the SQL WHERE clause
    pub fn matches(&self, article: &Article) -> bool {
        article.active == self.active && like_matches(&self.name_pattern, &article.name)
    }

    pub fn to_sql(&self, table_name: &str, columns: &[&str]) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self);
        let select = columns
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ");

        let query = [
            format!("SELECT {}", select),
            format!("FROM \"{}\"", table_name),
            format!("WHERE {}", where_clause),
            FilterOrder::generate(self.order),
            format!("LIMIT {} OFFSET {}", self.limit(), self.offset()),
        ]
        .join(" ");

        SqlResult { query, params }
    }

    pub fn to_count_sql(&self, table_name: &str) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self);
        SqlResult {
            query: format!(
                "SELECT COUNT(*) AS count FROM \"{}\" WHERE {}",
                table_name, where_clause
            ),
            params,
        }
    }
}
