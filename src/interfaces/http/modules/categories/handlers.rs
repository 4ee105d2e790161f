//! Category REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CategoryDto, CategoryRequest, CategorySearchQuery};
use crate::application::CategoryService;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, PageResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct CategoryState {
    pub categories: Arc<CategoryService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    params(CategorySearchQuery),
    responses(
        (status = 200, description = "Category listing", body = ApiResponse<PageResponse<CategoryDto>>)
    )
)]
pub async fn list_categories(
    State(state): State<CategoryState>,
    Query(query): Query<CategorySearchQuery>,
) -> Result<Json<ApiResponse<PageResponse<CategoryDto>>>, ApiError> {
    let condition = query.into_condition();
    let page = state
        .categories
        .list(&condition)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(PageResponse::from_page(page))))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/search",
    tag = "Categories",
    params(CategorySearchQuery),
    responses(
        (status = 200, description = "Search results", body = ApiResponse<PageResponse<CategoryDto>>)
    )
)]
pub async fn search_categories(
    State(state): State<CategoryState>,
    Query(query): Query<CategorySearchQuery>,
) -> Result<Json<ApiResponse<PageResponse<CategoryDto>>>, ApiError> {
    let condition = query.into_condition();
    let page = state
        .categories
        .search(&condition)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(PageResponse::from_page(page))))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/active",
    tag = "Categories",
    responses(
        (status = 200, description = "Active categories by display order", body = ApiResponse<Vec<CategoryDto>>)
    )
)]
pub async fn list_active_categories(
    State(state): State<CategoryState>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let categories = state
        .categories
        .find_active()
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_category(
    State(state): State<CategoryState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let category = state
        .categories
        .find_by_id(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(category.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<CategoryDto>),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_category(
    State(state): State<CategoryState>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDto>>), ApiError> {
    let category = state
        .categories
        .create(req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(category.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_category(
    State(state): State<CategoryState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let category = state
        .categories
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(category.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_category(
    State(state): State<CategoryState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .categories
        .delete(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}
