//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate
//! repositories. Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let post = repos.posts().find_by_id(7).await?;
//!     let active = repos.categories().find_active().await?;
//! }
//! ```

use super::category::CategoryRepository;
use super::post::PostRepository;

pub trait RepositoryProvider: Send + Sync {
    fn posts(&self) -> &dyn PostRepository;
    fn categories(&self) -> &dyn CategoryRepository;
}
