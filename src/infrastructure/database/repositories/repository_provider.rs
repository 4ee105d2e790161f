//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::category::CategoryRepository;
use crate::domain::post::PostRepository;
use crate::domain::repositories::RepositoryProvider;

use super::category_repository::SeaOrmCategoryRepository;
use super::post_repository::SeaOrmPostRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    posts: SeaOrmPostRepository,
    categories: SeaOrmCategoryRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            posts: SeaOrmPostRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn posts(&self) -> &dyn PostRepository {
        &self.posts
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }
}
