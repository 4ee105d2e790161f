//! Outward views of posts and categories

use chrono::{DateTime, Utc};

use crate::domain::category::display_name;
use crate::domain::{Category, Post, PostStatus};

/// Row of a post listing
#[derive(Debug, Clone, PartialEq)]
pub struct PostListView {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub category_name: &'static str,
    pub status: PostStatus,
    pub author_name: String,
    pub view_count: i64,
    pub is_notice: bool,
}

impl From<Post> for PostListView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            created_at: post.created_at,
            category_id: post.category_id,
            category_name: display_name(post.category_id),
            status: post.status,
            author_name: post.author_name,
            view_count: post.view_count,
            is_notice: post.is_notice,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostDetailView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub category_name: &'static str,
    pub status: PostStatus,
    pub author_name: String,
    pub view_count: i64,
    pub is_notice: bool,
}

impl From<Post> for PostDetailView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            category_name: display_name(post.category_id),
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            category_id: post.category_id,
            status: post.status,
            author_name: post.author_name,
            view_count: post.view_count,
            is_notice: post.is_notice,
        }
    }
}

pub type CategoryView = Category;
