//! Search conditions, query specs and the paginated search engine

pub mod condition;
pub mod engine;
pub mod query;

pub use condition::{
    PageRequest, SearchCondition, SearchConditionBuilder, SearchFilter, SearchType, SortDirection,
};
pub use engine::{PaginatedSearchEngine, RecordLookup, RowMapper};
pub use query::{KeywordSearch, OrderBy, QuerySpec, SortColumn};
