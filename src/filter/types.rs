use serde::{Deserialize, Serialize};

/// Rows per page, fixed
pub const PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Anything other than `DESC` sorts ascending
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Positional parameter of a rendered statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Bool(bool),
    Text(String),
}

/// Parameterised statement ready to bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
