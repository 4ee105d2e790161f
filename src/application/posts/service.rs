//! Post service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::application::views::{PostDetailView, PostListView};
use crate::domain::category::DEFAULT_POST_CATEGORY;
use crate::domain::{
    DomainError, DomainResult, Page, PaginatedSearchEngine, Post, PostFilter, PostStatus,
    RepositoryProvider, SearchCondition,
};

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

fn list_view(post: Post) -> PostListView {
    post.into()
}

/// Fields accepted when creating or updating a post
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    pub author_name: Option<String>,
    pub is_notice: Option<bool>,
}

impl PostForm {
    fn author(&self) -> Option<&str> {
        self.author_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

pub struct PostService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PostService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Board listing. Uses the unfiltered query when the condition carries
    /// no keyword or filter.
    pub async fn list(
        &self,
        condition: &SearchCondition<PostFilter>,
    ) -> DomainResult<Page<PostListView>> {
        let posts = self.repos.posts();
        if condition.is_empty() {
            PaginatedSearchEngine::list(posts, &list_view, condition).await
        } else {
            PaginatedSearchEngine::search(posts, &list_view, condition).await
        }
    }

    pub async fn search(
        &self,
        condition: &SearchCondition<PostFilter>,
    ) -> DomainResult<Page<PostListView>> {
        debug!("Post search: {}", condition.summary());
        PaginatedSearchEngine::search(self.repos.posts(), &list_view, condition).await
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<PostDetailView> {
        self.load(id).await.map(PostDetailView::from)
    }

    pub async fn create(&self, form: PostForm) -> DomainResult<PostDetailView> {
        let mut post = Post::new(form.title.clone(), form.content.clone());
        post.category_id = Some(form.category_id.unwrap_or(DEFAULT_POST_CATEGORY));
        post.status = PostStatus::Published;
        post.author_name = form.author().unwrap_or(ANONYMOUS_AUTHOR).to_string();
        post.is_notice = form.is_notice.unwrap_or(false);

        let saved = self.repos.posts().save(post).await?;
        info!("Post created: {} ({:?})", saved.id, saved.title);
        Ok(saved.into())
    }

    /// Replace title and content. Category, author and notice flag keep their
    /// current values when not given; status and view count never change here.
    pub async fn update(&self, id: i64, form: PostForm) -> DomainResult<PostDetailView> {
        let mut post = self.load(id).await?;

        post.title = form.title.clone();
        post.content = form.content.clone();
        if let Some(category_id) = form.category_id {
            post.category_id = Some(category_id);
        }
        if let Some(author) = form.author() {
            post.author_name = author.to_string();
        }
        if let Some(notice) = form.is_notice {
            post.is_notice = notice;
        }
        post.updated_at = Utc::now();

        let updated = self.repos.posts().update(post).await?;
        info!("Post updated: {}", updated.id);
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.load(id).await?;
        self.repos.posts().delete(id).await?;
        info!("Post deleted: {}", id);
        Ok(())
    }

    async fn load(&self, id: i64) -> DomainResult<Post> {
        self.repos
            .posts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }
}

// ── Tests ──────────────────────────────────────────────────────
