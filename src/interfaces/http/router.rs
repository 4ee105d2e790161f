//! API Router with Swagger UI

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PageResponse};
use super::modules::categories::{self, CategoryDto, CategoryRequest, CategoryState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, metrics_routes};
use super::modules::posts::{
    self, PostDetailDto, PostRequest, PostSearchResponse, PostState, PostSummaryDto,
};
use super::modules::request_id::request_id_middleware;
use crate::application::{CategoryService, PostService};
use crate::domain::RepositoryProvider;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Posts
        posts::list_posts,
        posts::search_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        // Categories
        categories::list_categories,
        categories::search_categories,
        categories::list_active_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PageResponse<PostSummaryDto>,
            PageResponse<CategoryDto>,
            health::HealthResponse,
            health::ComponentHealth,
            PostSummaryDto,
            PostDetailDto,
            PostSearchResponse,
            PostRequest,
            CategoryDto,
            CategoryRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Posts", description = "Board listing, keyword/filter search and post management"),
        (name = "Categories", description = "Category listing, search and management"),
    ),
    info(
        title = "Bulletin Board API",
        version = "1.0.0",
        description = "Paginated search over bulletin board posts and categories",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// `/api/v1` routes over the given repositories.
pub fn api_routes(repos: Arc<dyn RepositoryProvider>) -> Router {
    let categories = Arc::new(CategoryService::new(repos.clone()));
    let post_state = PostState {
        posts: Arc::new(PostService::new(repos)),
        categories: categories.clone(),
    };
    let category_state = CategoryState { categories };

    let post_routes = Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/search", get(posts::search_posts))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .with_state(post_state);

    let category_routes = Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/search", get(categories::search_categories))
        .route("/active", get(categories::list_active_categories))
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .with_state(category_state);

    Router::new()
        .nest("/api/v1/posts", post_routes)
        .nest("/api/v1/categories", category_routes)
}

/// Create the full application router
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new(db));

    let mut router = Router::new()
        .merge(api_routes(repos))
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = metrics {
        router = router.merge(metrics_routes(handle));
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// ── Tests ──────────────────────────────────────────────────────
