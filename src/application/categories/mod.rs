mod service;

pub use service::{CategoryForm, CategoryService};
