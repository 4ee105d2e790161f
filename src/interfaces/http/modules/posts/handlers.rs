//! Post REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{PostDetailDto, PostRequest, PostSearchQuery, PostSearchResponse, PostSummaryDto};
use crate::application::{CategoryService, PostService};
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, PageResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct PostState {
    pub posts: Arc<PostService>,
    pub categories: Arc<CategoryService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    params(PostSearchQuery),
    responses(
        (status = 200, description = "Board listing", body = ApiResponse<PageResponse<PostSummaryDto>>)
    )
)]
pub async fn list_posts(
    State(state): State<PostState>,
    Query(query): Query<PostSearchQuery>,
) -> Result<Json<ApiResponse<PageResponse<PostSummaryDto>>>, ApiError> {
    let condition = query.into_condition();
    let page = state.posts.list(&condition).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(PageResponse::from_page(page))))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/search",
    tag = "Posts",
    params(PostSearchQuery),
    responses(
        (status = 200, description = "Search results with active categories", body = ApiResponse<PostSearchResponse>)
    )
)]
pub async fn search_posts(
    State(state): State<PostState>,
    Query(query): Query<PostSearchQuery>,
) -> Result<Json<ApiResponse<PostSearchResponse>>, ApiError> {
    let condition = query.into_condition();
    let page = state.posts.search(&condition).await.map_err(error_response)?;
    let categories = state
        .categories
        .find_active()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(PostSearchResponse {
        page: PageResponse::from_page(page),
        categories: categories.into_iter().map(Into::into).collect(),
        condition: condition.summary(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = ApiResponse<PostDetailDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_post(
    State(state): State<PostState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PostDetailDto>>, ApiError> {
    let post = state.posts.find_by_id(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(post.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "Posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<PostDetailDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_post(
    State(state): State<PostState>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostDetailDto>>), ApiError> {
    let post = state
        .posts
        .create(req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(post.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<PostDetailDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_post(
    State(state): State<PostState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<Json<ApiResponse<PostDetailDto>>, ApiError> {
    let post = state
        .posts
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(post.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_post(
    State(state): State<PostState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.posts.delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(())))
}
