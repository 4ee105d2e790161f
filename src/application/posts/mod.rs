mod service;

pub use service::{PostForm, PostService, ANONYMOUS_AUTHOR};
