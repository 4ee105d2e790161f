//! Search conditions and their normalization
//!
//! A [`SearchCondition`] is built once per request and is always normalized:
//! out-of-range paging, blank sort options and whitespace-only keywords are
//! coerced to safe defaults instead of being rejected, so a listing can
//! always be rendered.

use std::fmt;

use super::query::SortColumn;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SORT_BY: &str = "created_at";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Case-insensitive `ASC`/`DESC`; anything else is `DESC`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("ASC") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which text fields a keyword is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    Title,
    Content,
    #[default]
    TitleContent,
    Author,
}

impl SearchType {
    /// Blank, missing and unrecognized values all fall back to the combined
    /// title + content search.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("title") => Self::Title,
            Some("content") => Self::Content,
            Some("author") => Self::Author,
            _ => Self::TitleContent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::TitleContent => "title_content",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim a keyword; whitespace-only keywords are absent.
pub fn normalize_keyword(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Paging and sorting shared by every entity's search condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort_by: String,
    sort_direction: SortDirection,
}

impl PageRequest {
    /// Build a normalized page request from raw request values.
    ///
    /// - `page < 1` becomes 1
    /// - `size < 1` becomes 10, `size > 100` becomes 100
    /// - blank `sort_by` becomes `created_at`
    /// - unknown `sort_direction` becomes `DESC`
    pub fn new(page: i64, size: i64, sort_by: Option<&str>, sort_direction: Option<&str>) -> Self {
        let page = if page < 1 {
            DEFAULT_PAGE
        } else {
            u32::try_from(page).unwrap_or(u32::MAX)
        };
        let size = if size < 1 {
            DEFAULT_PAGE_SIZE
        } else if size > i64::from(MAX_PAGE_SIZE) {
            MAX_PAGE_SIZE
        } else {
            size as u32
        };
        let sort_by = sort_by
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SORT_BY)
            .to_string();

        Self {
            page,
            size,
            sort_by,
            sort_direction: SortDirection::parse(sort_direction),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn offset(&self) -> u64 {
        crate::shared::page_offset(self.page, self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(i64::from(DEFAULT_PAGE), i64::from(DEFAULT_PAGE_SIZE), None, None)
    }
}

/// Entity-specific part of a search condition.
///
/// Implementors define the closed sets of searchable text fields, filter
/// predicates and sortable columns for one entity.
pub trait SearchFilter: Clone + fmt::Debug + Default + PartialEq + Send + Sync {
    type Field: Copy + fmt::Debug + PartialEq + Send + Sync + 'static;
    type Predicate: Clone + fmt::Debug + PartialEq + Send + Sync;
    type SortColumn: SortColumn;

    /// Coerce blank or redundant values. Must be idempotent.
    fn normalize(self) -> Self;

    /// Whether any entity-specific filter is set.
    fn has_filters(&self) -> bool;

    /// Fields a keyword is matched against for the given search type.
    fn keyword_fields(search_type: SearchType) -> &'static [Self::Field];

    /// Predicates to AND together, in a stable order.
    fn predicates(&self) -> Vec<Self::Predicate>;

    /// Human-readable fragments for [`SearchCondition::summary`].
    fn describe(&self) -> Vec<String>;
}

/// Normalized search, sort and paging parameters for one request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCondition<F> {
    paging: PageRequest,
    keyword: Option<String>,
    search_type: SearchType,
    filter: F,
}

impl<F: SearchFilter> SearchCondition<F> {
    pub fn new(
        paging: PageRequest,
        keyword: Option<&str>,
        search_type: Option<&str>,
        filter: F,
    ) -> Self {
        Self {
            paging,
            keyword: normalize_keyword(keyword),
            search_type: SearchType::parse(search_type),
            filter: filter.normalize(),
        }
    }

    pub fn builder() -> SearchConditionBuilder<F> {
        SearchConditionBuilder::default()
    }

    /// Re-apply every normalization rule. A no-op on conditions built
    /// through [`SearchCondition::new`] or the builder.
    pub fn normalize(self) -> Self {
        let paging = PageRequest::new(
            i64::from(self.paging.page),
            i64::from(self.paging.size),
            Some(&self.paging.sort_by),
            Some(self.paging.sort_direction.as_str()),
        );
        Self::new(
            paging,
            self.keyword.as_deref(),
            Some(self.search_type.as_str()),
            self.filter,
        )
    }

    pub fn paging(&self) -> &PageRequest {
        &self.paging
    }

    pub fn page(&self) -> u32 {
        self.paging.page
    }

    pub fn size(&self) -> u32 {
        self.paging.size
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn has_keyword(&self) -> bool {
        self.keyword.is_some()
    }

    /// No keyword and no entity filter: callers use the plain listing query.
    pub fn is_empty(&self) -> bool {
        !self.has_keyword() && !self.filter.has_filters()
    }

    /// One-line description of the effective condition, for logs.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(keyword) = &self.keyword {
            parts.push(format!("keyword={} ({})", keyword, self.search_type));
        }
        parts.extend(self.filter.describe());
        parts.push(format!(
            "sort={} {}",
            self.paging.sort_by, self.paging.sort_direction
        ));
        parts.push(format!("page={} size={}", self.paging.page, self.paging.size));
        parts.join(" ")
    }
}

impl<F: SearchFilter> Default for SearchCondition<F> {
    fn default() -> Self {
        Self::new(PageRequest::default(), None, None, F::default())
    }
}

/// Builder producing a normalized [`SearchCondition`]
#[derive(Debug, Clone)]
pub struct SearchConditionBuilder<F> {
    page: i64,
    size: i64,
    sort_by: Option<String>,
    sort_direction: Option<String>,
    keyword: Option<String>,
    search_type: Option<String>,
    filter: F,
}

impl<F: SearchFilter> Default for SearchConditionBuilder<F> {
    fn default() -> Self {
        Self {
            page: i64::from(DEFAULT_PAGE),
            size: i64::from(DEFAULT_PAGE_SIZE),
            sort_by: None,
            sort_direction: None,
            keyword: None,
            search_type: None,
            filter: F::default(),
        }
    }
}

impl<F: SearchFilter> SearchConditionBuilder<F> {
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn sort_direction(mut self, direction: impl Into<String>) -> Self {
        self.sort_direction = Some(direction.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn search_type(mut self, search_type: impl Into<String>) -> Self {
        self.search_type = Some(search_type.into());
        self
    }

    pub fn filter(mut self, filter: F) -> Self {
        self.filter = filter;
        self
    }

    pub fn build(self) -> SearchCondition<F> {
        let paging = PageRequest::new(
            self.page,
            self.size,
            self.sort_by.as_deref(),
            self.sort_direction.as_deref(),
        );
        SearchCondition::new(
            paging,
            self.keyword.as_deref(),
            self.search_type.as_deref(),
            self.filter,
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::PostFilter;

    type Condition = SearchCondition<PostFilter>;

    #[test]
    fn fully_invalid_input_is_coerced() {
        let condition = Condition::builder()
            .keyword(" ")
            .sort_by("")
            .sort_direction("bogus")
            .page(-1)
            .size(0)
            .build();

        assert_eq!(condition.keyword(), None);
        assert_eq!(condition.search_type(), SearchType::TitleContent);
        assert_eq!(condition.search_type().as_str(), "title_content");
        assert_eq!(condition.paging().sort_by(), "created_at");
        assert_eq!(condition.paging().sort_direction(), SortDirection::Desc);
        assert_eq!(condition.page(), 1);
        assert_eq!(condition.size(), 10);
    }

    #[test]
    fn size_is_capped() {
        assert_eq!(Condition::builder().size(150).build().size(), 100);
        assert_eq!(Condition::builder().size(100).build().size(), 100);
        assert_eq!(Condition::builder().size(1).build().size(), 1);
    }

    #[test]
    fn non_positive_page_becomes_first() {
        assert_eq!(Condition::builder().page(0).build().page(), 1);
        assert_eq!(Condition::builder().page(-7).build().page(), 1);
        assert_eq!(Condition::builder().page(4).build().page(), 4);
    }

    #[test]
    fn sort_direction_is_case_insensitive() {
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("Desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("ascending")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
    }

    #[test]
    fn unknown_search_type_falls_back_to_title_content() {
        for filter_only in ["category", "status", "date_range"] {
            assert_eq!(SearchType::parse(Some(filter_only)), SearchType::TitleContent);
        }
        assert_eq!(SearchType::parse(Some("  ")), SearchType::TitleContent);
        assert_eq!(SearchType::parse(Some("TITLE")), SearchType::Title);
        assert_eq!(SearchType::parse(Some("author")), SearchType::Author);
    }

    #[test]
    fn keyword_is_trimmed() {
        let condition = Condition::builder().keyword("  rust  ").build();
        assert_eq!(condition.keyword(), Some("rust"));
        assert!(condition.has_keyword());
        assert!(!condition.is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = vec![
            Condition::builder().build(),
            Condition::builder()
                .keyword(" x ")
                .search_type("content")
                .sort_by(" title ")
                .sort_direction("asc")
                .page(3)
                .size(500)
                .build(),
            Condition::builder()
                .filter(PostFilter {
                    category_ids: vec![3, 1, 3],
                    author_name: Some("  ".into()),
                    ..Default::default()
                })
                .page(-2)
                .build(),
        ];

        for condition in inputs {
            assert_eq!(condition.clone().normalize(), condition);
        }
    }

    #[test]
    fn empty_condition_has_no_filters() {
        let condition = Condition::default();
        assert!(condition.is_empty());

        let filtered = Condition::builder()
            .filter(PostFilter {
                is_notice: Some(false),
                ..Default::default()
            })
            .build();
        assert!(!filtered.is_empty());
    }

    #[test]
    fn summary_mentions_keyword_and_sort() {
        let condition = Condition::builder()
            .keyword("axum")
            .search_type("title")
            .sort_direction("ASC")
            .build();
        let summary = condition.summary();
        assert!(summary.contains("keyword=axum (title)"));
        assert!(summary.contains("sort=created_at ASC"));
        assert!(summary.contains("page=1 size=10"));
    }
}
