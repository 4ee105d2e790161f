//! Post DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{PostDetailView, PostForm, PostListView};
use crate::domain::{PostFilter, PostStatus, SearchCondition};
use crate::interfaces::http::common::{
    parse_bool, parse_date, parse_id_list, parse_paging, PageResponse,
};
use crate::interfaces::http::modules::categories::CategoryDto;

/// Listing/search query string
///
/// Every field is read as text so that an unparseable optional filter is
/// ignored rather than rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
pub struct PostSearchQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size, 1-100 (default 10)
    pub size: Option<String>,
    /// title | content | title_content | author
    pub search_type: Option<String>,
    pub keyword: Option<String>,
    /// id | title | created_at | updated_at | view_count | author_name | category_id
    pub sort_by: Option<String>,
    /// ASC | DESC
    pub sort_direction: Option<String>,
    /// Comma separated category ids
    pub category_ids: Option<String>,
    /// PUBLISHED | DRAFT | DELETED
    pub status: Option<String>,
    pub author_name: Option<String>,
    pub is_notice: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub start_date: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub end_date: Option<String>,
}

impl PostSearchQuery {
    pub fn into_condition(self) -> SearchCondition<PostFilter> {
        let filter = PostFilter {
            category_ids: parse_id_list(self.category_ids.as_deref()),
            status: self.status.as_deref().and_then(PostStatus::parse),
            author_name: self.author_name,
            is_notice: parse_bool(self.is_notice.as_deref()),
            start_date: parse_date(self.start_date.as_deref()),
            end_date: parse_date(self.end_date.as_deref()),
        };

        let mut builder = SearchCondition::builder()
            .page(parse_paging(self.page.as_deref(), 1))
            .size(parse_paging(self.size.as_deref(), 10))
            .filter(filter);
        if let Some(keyword) = self.keyword {
            builder = builder.keyword(keyword);
        }
        if let Some(search_type) = self.search_type {
            builder = builder.search_type(search_type);
        }
        if let Some(sort_by) = self.sort_by {
            builder = builder.sort_by(sort_by);
        }
        if let Some(direction) = self.sort_direction {
            builder = builder.sort_direction(direction);
        }
        builder.build()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryDto {
    pub id: i64,
    pub title: String,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub status: String,
    pub author_name: String,
    pub view_count: i64,
    pub is_notice: bool,
    pub created_at: String,
}

impl From<PostListView> for PostSummaryDto {
    fn from(v: PostListView) -> Self {
        Self {
            id: v.id,
            title: v.title,
            category_id: v.category_id,
            category_name: v.category_name.to_string(),
            status: v.status.to_string(),
            author_name: v.author_name,
            view_count: v.view_count,
            is_notice: v.is_notice,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub status: String,
    pub author_name: String,
    pub view_count: i64,
    pub is_notice: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostDetailView> for PostDetailDto {
    fn from(v: PostDetailView) -> Self {
        Self {
            id: v.id,
            title: v.title,
            content: v.content,
            category_id: v.category_id,
            category_name: v.category_name.to_string(),
            status: v.status.to_string(),
            author_name: v.author_name,
            view_count: v.view_count,
            is_notice: v.is_notice,
            created_at: v.created_at.to_rfc3339(),
            updated_at: v.updated_at.to_rfc3339(),
        }
    }
}

/// Search results together with the categories a search form offers
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSearchResponse {
    pub page: PageResponse<PostSummaryDto>,
    pub categories: Vec<CategoryDto>,
    /// Effective condition after normalization
    pub condition: String,
}

/// Body of create and update requests
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[validate(range(min = 1, message = "must be positive"))]
    pub category_id: Option<i64>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub author_name: Option<String>,
    pub is_notice: Option<bool>,
}

impl From<PostRequest> for PostForm {
    fn from(r: PostRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
            category_id: r.category_id,
            author_name: r.author_name,
            is_notice: r.is_notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;
    use crate::domain::SortDirection;

    #[test]
    fn query_string_decodes_into_normalized_condition() {
        let uri: Uri = "/posts?page=0&size=500&keyword=%20rust%20&searchType=bogus\
                        &sortDirection=asc&categoryIds=2,3,x,2&status=draft&isNotice=maybe\
                        &startDate=2024-01-01&endDate=nope"
            .parse()
            .unwrap();
        let Query(query) = Query::<PostSearchQuery>::try_from_uri(&uri).unwrap();
        let condition = query.into_condition();

        assert_eq!(condition.page(), 1);
        assert_eq!(condition.size(), 100);
        assert_eq!(condition.keyword(), Some("rust"));
        assert_eq!(condition.search_type().as_str(), "title_content");
        assert_eq!(condition.paging().sort_by(), "created_at");
        assert_eq!(condition.paging().sort_direction(), SortDirection::Asc);

        let filter = condition.filter();
        assert_eq!(filter.category_ids, vec![2, 3]);
        assert_eq!(filter.status, Some(PostStatus::Draft));
        assert_eq!(filter.is_notice, None);
        assert!(filter.start_date.is_some());
        assert_eq!(filter.end_date, None);
    }

    #[test]
    fn empty_query_is_empty_condition() {
        let condition = PostSearchQuery::default().into_condition();
        assert!(condition.is_empty());
        assert_eq!(condition.page(), 1);
        assert_eq!(condition.size(), 10);
    }
}
