//! Posts

pub mod filter;
pub mod model;
pub mod repository;

pub use filter::{PostField, PostFilter, PostPredicate, PostSortColumn};
pub use model::{Post, PostStatus};
pub use repository::PostRepository;
