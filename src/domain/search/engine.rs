//! Paginated search engine
//!
//! Glue between a normalized condition, a record lookup and a row mapper.

use async_trait::async_trait;
use tracing::debug;

use super::condition::{SearchCondition, SearchFilter};
use super::query::QuerySpec;
use crate::shared::{DomainResult, Page};

/// Executes a [`QuerySpec`] and returns one page of records plus the total
/// number of matching records.
#[async_trait]
pub trait RecordLookup<F: SearchFilter>: Send + Sync {
    type Record: Send;

    async fn lookup(&self, spec: &QuerySpec<F>) -> DomainResult<(Vec<Self::Record>, u64)>;
}

/// Converts a stored record into its outward view.
pub trait RowMapper<R> {
    type View;

    fn map_row(&self, record: R) -> Self::View;
}

impl<R, V, M> RowMapper<R> for M
where
    M: Fn(R) -> V,
{
    type View = V;

    fn map_row(&self, record: R) -> V {
        self(record)
    }
}

pub struct PaginatedSearchEngine;

impl PaginatedSearchEngine {
    /// Keyword and filter search.
    pub async fn search<F, L, M>(
        lookup: &L,
        mapper: &M,
        condition: &SearchCondition<F>,
    ) -> DomainResult<Page<M::View>>
    where
        F: SearchFilter,
        L: RecordLookup<F> + ?Sized,
        M: RowMapper<L::Record>,
    {
        Self::run(lookup, mapper, condition, QuerySpec::from_condition(condition)).await
    }

    /// Plain listing: ordering and paging from the condition, nothing else.
    pub async fn list<F, L, M>(
        lookup: &L,
        mapper: &M,
        condition: &SearchCondition<F>,
    ) -> DomainResult<Page<M::View>>
    where
        F: SearchFilter,
        L: RecordLookup<F> + ?Sized,
        M: RowMapper<L::Record>,
    {
        Self::run(lookup, mapper, condition, QuerySpec::listing(condition)).await
    }

    async fn run<F, L, M>(
        lookup: &L,
        mapper: &M,
        condition: &SearchCondition<F>,
        spec: QuerySpec<F>,
    ) -> DomainResult<Page<M::View>>
    where
        F: SearchFilter,
        L: RecordLookup<F> + ?Sized,
        M: RowMapper<L::Record>,
    {
        debug!(condition = %condition.summary(), "Executing paginated query");

        let (records, total) = lookup.lookup(&spec).await?;
        let content = records
            .into_iter()
            .take(condition.size() as usize)
            .map(|record| mapper.map_row(record))
            .collect();

        Ok(Page::of(content, condition.page(), condition.size(), total))
    }
}

// ── Tests ──────────────────────────────────────────────────────
