//! Database entities module

pub mod category;
pub mod post;

pub use category::Entity as Category;
pub use post::Entity as Post;
