pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod types;

pub use filter::FilterSpec;
pub use types::{SortDirection, SqlParam, SqlResult, PAGE_SIZE};
