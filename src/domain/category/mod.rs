//! Categories

pub mod filter;
pub mod model;
pub mod repository;

pub use filter::{CategoryField, CategoryFilter, CategoryPredicate, CategorySortColumn};
pub use model::{display_name, Category, DEFAULT_CATEGORIES, DEFAULT_POST_CATEGORY, UNCLASSIFIED};
pub use repository::CategoryRepository;
