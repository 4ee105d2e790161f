//! Post repository interface

use async_trait::async_trait;

use super::filter::PostFilter;
use super::model::Post;
use crate::domain::search::{QuerySpec, RecordLookup};
use crate::shared::DomainResult;

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Rows matching `spec`, ordered and limited by it.
    async fn find_page(&self, spec: &QuerySpec<PostFilter>) -> DomainResult<Vec<Post>>;
    /// Number of rows matching `spec`, ignoring order and paging.
    async fn count(&self, spec: &QuerySpec<PostFilter>) -> DomainResult<u64>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>>;
    async fn save(&self, post: Post) -> DomainResult<Post>;
    async fn update(&self, post: Post) -> DomainResult<Post>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

#[async_trait]
impl<'r> RecordLookup<PostFilter> for dyn PostRepository + 'r {
    type Record = Post;

    async fn lookup(&self, spec: &QuerySpec<PostFilter>) -> DomainResult<(Vec<Post>, u64)> {
        let total = self.count(spec).await?;
        if spec.offset >= total {
            return Ok((Vec::new(), total));
        }
        let rows = self.find_page(spec).await?;
        Ok((rows, total))
    }
}
