pub mod categories;
pub mod posts;
pub mod views;

// Re-export key types for convenience
pub use categories::{CategoryForm, CategoryService};
pub use posts::{PostForm, PostService};
pub use views::{CategoryView, PostDetailView, PostListView};
