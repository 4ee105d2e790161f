//! # Board Service
//!
//! Bulletin board backend: posts, categories and a paginated search engine
//! shared by both.
//!
//! ## Architecture
//!
//! - **domain**: entities, search conditions, filters and repository traits
//! - **application**: post and category services, list/detail views
//! - **infrastructure**: SeaORM repositories, migrations, in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, pagination and shutdown handling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, run_migrations, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::{api_routes, create_api_router};
