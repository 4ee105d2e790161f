//! Post-specific search filter

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::model::PostStatus;
use crate::domain::search::{SearchFilter, SearchType, SortColumn};

/// Text fields a post keyword can match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Content,
    AuthorName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostPredicate {
    CategoryIn(Vec<i64>),
    StatusEq(PostStatus),
    AuthorEq(String),
    NoticeEq(bool),
    /// `created_at >= t`
    CreatedFrom(DateTime<Utc>),
    /// `created_at < t`
    CreatedBefore(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortColumn {
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
    ViewCount,
    AuthorName,
    CategoryId,
}

impl SortColumn for PostSortColumn {
    const DEFAULT: Self = Self::CreatedAt;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "created_at" | "createdAt" => Some(Self::CreatedAt),
            "updated_at" | "updatedAt" => Some(Self::UpdatedAt),
            "view_count" | "viewCount" => Some(Self::ViewCount),
            "author_name" | "authorName" => Some(Self::AuthorName),
            "category_id" | "categoryId" => Some(Self::CategoryId),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::ViewCount => "view_count",
            Self::AuthorName => "author_name",
            Self::CategoryId => "category_id",
        }
    }
}

const TITLE: &[PostField] = &[PostField::Title];
const CONTENT: &[PostField] = &[PostField::Content];
const TITLE_CONTENT: &[PostField] = &[PostField::Title, PostField::Content];
const AUTHOR: &[PostField] = &[PostField::AuthorName];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    pub category_ids: Vec<i64>,
    pub status: Option<PostStatus>,
    pub author_name: Option<String>,
    pub is_notice: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PostFilter {
    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

impl SearchFilter for PostFilter {
    type Field = PostField;
    type Predicate = PostPredicate;
    type SortColumn = PostSortColumn;

    fn normalize(self) -> Self {
        let mut category_ids: Vec<i64> = Vec::with_capacity(self.category_ids.len());
        for id in self.category_ids {
            if !category_ids.contains(&id) {
                category_ids.push(id);
            }
        }

        Self {
            category_ids,
            author_name: self
                .author_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ..self
        }
    }

    fn has_filters(&self) -> bool {
        !self.category_ids.is_empty()
            || self.status.is_some()
            || self.author_name.is_some()
            || self.is_notice.is_some()
            || self.has_date_range()
    }

    fn keyword_fields(search_type: SearchType) -> &'static [PostField] {
        match search_type {
            SearchType::Title => TITLE,
            SearchType::Content => CONTENT,
            SearchType::TitleContent => TITLE_CONTENT,
            SearchType::Author => AUTHOR,
        }
    }

    fn predicates(&self) -> Vec<PostPredicate> {
        let mut predicates = Vec::new();
        if !self.category_ids.is_empty() {
            predicates.push(PostPredicate::CategoryIn(self.category_ids.clone()));
        }
        if let Some(status) = self.status {
            predicates.push(PostPredicate::StatusEq(status));
        }
        if let Some(author) = &self.author_name {
            predicates.push(PostPredicate::AuthorEq(author.clone()));
        }
        if let Some(notice) = self.is_notice {
            predicates.push(PostPredicate::NoticeEq(notice));
        }
        if let Some(start) = self.start_date {
            predicates.push(PostPredicate::CreatedFrom(start_of_day(start)));
        }
        // end date is inclusive
        if let Some(end) = self.end_date.and_then(|d| d.checked_add_days(Days::new(1))) {
            predicates.push(PostPredicate::CreatedBefore(start_of_day(end)));
        }
        predicates
    }

    fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if !self.category_ids.is_empty() {
            parts.push(format!("categories={:?}", self.category_ids));
        }
        if let Some(status) = self.status {
            parts.push(format!("status={status}"));
        }
        if let Some(author) = &self.author_name {
            parts.push(format!("author={author}"));
        }
        if let Some(notice) = self.is_notice {
            parts.push(format!("notice={notice}"));
        }
        if self.has_date_range() {
            let fmt = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
            parts.push(format!("date={}..{}", fmt(self.start_date), fmt(self.end_date)));
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_author_and_duplicate_categories() {
        let filter = PostFilter {
            category_ids: vec![4, 2, 4, 1, 2],
            author_name: Some("   ".into()),
            ..Default::default()
        }
        .normalize();

        assert_eq!(filter.category_ids, vec![4, 2, 1]);
        assert_eq!(filter.author_name, None);
        assert!(filter.has_filters());
    }

    #[test]
    fn end_date_is_inclusive() {
        let filter = PostFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
            ..Default::default()
        };
        let predicates = filter.predicates();
        let from = "2024-03-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let before = "2024-04-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(
            predicates,
            vec![
                PostPredicate::CreatedFrom(from),
                PostPredicate::CreatedBefore(before)
            ]
        );
    }

    #[test]
    fn describe_lists_active_filters() {
        let filter = PostFilter {
            status: Some(PostStatus::Draft),
            is_notice: Some(true),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..Default::default()
        };
        assert_eq!(
            filter.describe(),
            vec!["status=DRAFT", "notice=true", "date=..2024-01-02"]
        );
    }
}
