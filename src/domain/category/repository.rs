//! Category repository interface

use async_trait::async_trait;

use super::filter::CategoryFilter;
use super::model::Category;
use crate::domain::search::{QuerySpec, RecordLookup};
use crate::shared::DomainResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_page(&self, spec: &QuerySpec<CategoryFilter>) -> DomainResult<Vec<Category>>;
    async fn count(&self, spec: &QuerySpec<CategoryFilter>) -> DomainResult<u64>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Category>>;
    /// All categories ordered by display order.
    async fn find_all(&self) -> DomainResult<Vec<Category>>;
    /// Active categories ordered by display order.
    async fn find_active(&self) -> DomainResult<Vec<Category>>;
    async fn save(&self, category: Category) -> DomainResult<Category>;
    async fn update(&self, category: Category) -> DomainResult<Category>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

#[async_trait]
impl<'r> RecordLookup<CategoryFilter> for dyn CategoryRepository + 'r {
    type Record = Category;

    async fn lookup(
        &self,
        spec: &QuerySpec<CategoryFilter>,
    ) -> DomainResult<(Vec<Category>, u64)> {
        let total = self.count(spec).await?;
        if spec.offset >= total {
            return Ok((Vec::new(), total));
        }
        let rows = self.find_page(spec).await?;
        Ok((rows, total))
    }
}
