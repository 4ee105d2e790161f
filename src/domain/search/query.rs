//! Storage-neutral query description
//!
//! A [`QuerySpec`] is what a repository executes: an optional keyword match
//! over a closed set of fields, AND-combined predicates, one ORDER BY term
//! from a whitelist, and offset/limit. Repositories translate it into their
//! own query language; raw request strings never reach a column name.

use std::fmt;

use super::condition::{SearchCondition, SearchFilter, SortDirection};

/// Whitelisted sortable column of one entity.
pub trait SortColumn: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Column used when the requested one is unknown.
    const DEFAULT: Self;

    /// Look up a column by its snake_case or camelCase name.
    fn from_name(name: &str) -> Option<Self>;

    fn name(&self) -> &'static str;

    /// Resolve a requested column, falling back to [`Self::DEFAULT`].
    fn resolve(name: &str) -> Self {
        Self::from_name(name.trim()).unwrap_or(Self::DEFAULT)
    }
}

/// Keyword matched (substring) against any of `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSearch<Field: 'static> {
    pub keyword: String,
    pub fields: &'static [Field],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderBy<C> {
    pub column: C,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec<F: SearchFilter> {
    pub keyword: Option<KeywordSearch<F::Field>>,
    pub predicates: Vec<F::Predicate>,
    pub order: OrderBy<F::SortColumn>,
    pub offset: u64,
    pub limit: u64,
}

impl<F: SearchFilter> QuerySpec<F> {
    /// Filtered query: keyword, predicates, order and paging.
    pub fn from_condition(condition: &SearchCondition<F>) -> Self {
        let keyword = condition.keyword().map(|keyword| KeywordSearch {
            keyword: keyword.to_string(),
            fields: F::keyword_fields(condition.search_type()),
        });

        Self {
            keyword,
            predicates: condition.filter().predicates(),
            ..Self::listing(condition)
        }
    }

    /// Unfiltered listing: order and paging only.
    pub fn listing(condition: &SearchCondition<F>) -> Self {
        let paging = condition.paging();
        Self {
            keyword: None,
            predicates: Vec::new(),
            order: OrderBy {
                column: F::SortColumn::resolve(paging.sort_by()),
                direction: paging.sort_direction(),
            },
            offset: paging.offset(),
            limit: u64::from(paging.size()),
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.keyword.is_some() || !self.predicates.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::category::{CategoryField, CategoryFilter, CategorySortColumn};
    use crate::domain::post::{PostField, PostFilter, PostPredicate, PostSortColumn, PostStatus};

    #[test]
    fn unknown_sort_column_falls_back_to_created_at() {
        let condition = SearchCondition::<PostFilter>::builder()
            .sort_by("password; DROP TABLE posts")
            .build();
        let spec = QuerySpec::from_condition(&condition);
        assert_eq!(spec.order.column, PostSortColumn::CreatedAt);
        assert_eq!(spec.order.direction, SortDirection::Desc);
    }

    #[test]
    fn camel_case_sort_names_are_accepted() {
        assert_eq!(PostSortColumn::resolve("viewCount"), PostSortColumn::ViewCount);
        assert_eq!(PostSortColumn::resolve("view_count"), PostSortColumn::ViewCount);
        assert_eq!(PostSortColumn::resolve("title"), PostSortColumn::Title);
    }

    #[test]
    fn keyword_fields_follow_search_type() {
        let spec = |search_type: &str| {
            let condition = SearchCondition::<PostFilter>::builder()
                .keyword("rust")
                .search_type(search_type)
                .build();
            QuerySpec::from_condition(&condition)
                .keyword
                .map(|k| k.fields.to_vec())
        };

        assert_eq!(spec("title"), Some(vec![PostField::Title]));
        assert_eq!(spec("content"), Some(vec![PostField::Content]));
        assert_eq!(spec("author"), Some(vec![PostField::AuthorName]));
        assert_eq!(
            spec("tags"),
            Some(vec![PostField::Title, PostField::Content])
        );
    }

    #[test]
    fn category_keyword_maps_to_name_and_description() {
        let condition = SearchCondition::<CategoryFilter>::builder()
            .keyword("news")
            .build();
        let spec = QuerySpec::from_condition(&condition);
        let keyword = spec.keyword.expect("keyword");
        assert_eq!(keyword.fields, &[CategoryField::Name, CategoryField::Description]);
        assert_eq!(spec.order.column, CategorySortColumn::CreatedAt);
    }

    #[test]
    fn predicates_are_and_combined_in_order() {
        let filter = PostFilter {
            category_ids: vec![1, 3],
            status: Some(PostStatus::Published),
            is_notice: Some(true),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        let condition = SearchCondition::builder().filter(filter).page(3).size(20).build();
        let spec = QuerySpec::from_condition(&condition);

        assert_eq!(spec.predicates.len(), 5);
        assert_eq!(spec.predicates[0], PostPredicate::CategoryIn(vec![1, 3]));
        assert_eq!(spec.predicates[1], PostPredicate::StatusEq(PostStatus::Published));
        assert_eq!(spec.offset, 40);
        assert_eq!(spec.limit, 20);
        assert!(spec.is_filtered());
    }

    #[test]
    fn listing_ignores_filters() {
        let condition = SearchCondition::builder()
            .keyword("x")
            .filter(PostFilter {
                author_name: Some("kim".into()),
                ..Default::default()
            })
            .sort_by("title")
            .sort_direction("asc")
            .build();
        let spec = QuerySpec::listing(&condition);
        assert!(!spec.is_filtered());
        assert_eq!(spec.order.column, PostSortColumn::Title);
        assert_eq!(spec.order.direction, SortDirection::Asc);
    }
}
