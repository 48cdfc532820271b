use std::cmp::Ordering;

use crate::database::models::Article;

use super::types::SortDirection;

pub struct FilterOrder;

impl FilterOrder {
    /// `name` in the requested direction; `id` ascending breaks ties so
    /// pages stay stable when names repeat across brands.
    pub fn generate(direction: SortDirection) -> String {
        format!("ORDER BY \"name\" {}, \"id\" ASC", direction.to_sql())
    }

    /// In-memory counterpart of [`FilterOrder::generate`]
    pub fn compare(a: &Article, b: &Article, direction: SortDirection) -> Ordering {
        let by_name = a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name));

        let by_name = match direction {
            SortDirection::Asc => by_name,
            SortDirection::Desc => by_name.reverse(),
        };

        by_name.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(id: i64, name: &str) -> Article {
        Article {
            id,
            name: name.to_string(),
            brand: format!("brand {}", id),
            active: true,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn order_clause_always_ends_with_id() {
        assert_eq!(FilterOrder::generate(SortDirection::Asc), "ORDER BY \"name\" ASC, \"id\" ASC");
        assert_eq!(FilterOrder::generate(SortDirection::Desc), "ORDER BY \"name\" DESC, \"id\" ASC");
    }

    #[test]
    fn ties_break_on_id_ascending_in_both_directions() {
        let mut rows = vec![article(3, "pen"), article(1, "pen"), article(2, "cap")];

        rows.sort_by(|a, b| FilterOrder::compare(a, b, SortDirection::Asc));
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        rows.sort_by(|a, b| FilterOrder::compare(a, b, SortDirection::Desc));
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn names_compare_case_insensitively() {
        let mut rows = vec![article(1, "banana"), article(2, "Apple")];
        rows.sort_by(|a, b| FilterOrder::compare(a, b, SortDirection::Asc));
        assert_eq!(rows[0].name, "Apple");
    }
}
