pub mod category;
pub mod post;
pub mod repositories;
pub mod search;

// Re-export commonly used types
pub use category::{Category, CategoryFilter, CategoryRepository};
pub use post::{Post, PostFilter, PostRepository, PostStatus};
pub use repositories::RepositoryProvider;
pub use search::{PageRequest, PaginatedSearchEngine, SearchCondition, SearchType, SortDirection};

pub use crate::shared::{DomainError, DomainResult, Page};
