//! Category DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{CategoryForm, CategoryView};
use crate::domain::{CategoryFilter, SearchCondition};
use crate::interfaces::http::common::{parse_bool, parse_opt, parse_paging};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryView> for CategoryDto {
    fn from(c: CategoryView) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            color: c.color,
            display_order: c.display_order,
            is_active: c.is_active,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Category listing/search query string
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
pub struct CategorySearchQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    /// title (name) | content (description) | title_content
    pub search_type: Option<String>,
    pub keyword: Option<String>,
    /// id | name | display_order | created_at | updated_at
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub is_active: Option<String>,
    pub min_display_order: Option<String>,
    pub max_display_order: Option<String>,
    pub description: Option<String>,
}

impl CategorySearchQuery {
    pub fn into_condition(self) -> SearchCondition<CategoryFilter> {
        let filter = CategoryFilter {
            is_active: parse_bool(self.is_active.as_deref()),
            min_display_order: parse_opt(self.min_display_order.as_deref()),
            max_display_order: parse_opt(self.max_display_order.as_deref()),
            description: self.description,
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

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub color: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<CategoryRequest> for CategoryForm {
    fn from(r: CategoryRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            color: r.color,
            display_order: r.display_order,
            is_active: r.is_active,
        }
    }
}
