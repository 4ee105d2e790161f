//! Category service

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::application::views::CategoryView;
use crate::domain::{
    Category, CategoryFilter, DomainError, DomainResult, Page, PaginatedSearchEngine,
    RepositoryProvider, SearchCondition,
};

/// Fields accepted when creating or updating a category
#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn view(category: Category) -> CategoryView {
    category
}

pub struct CategoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CategoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(
        &self,
        condition: &SearchCondition<CategoryFilter>,
    ) -> DomainResult<Page<CategoryView>> {
        let categories = self.repos.categories();
        if condition.is_empty() {
            PaginatedSearchEngine::list(categories, &view, condition).await
        } else {
            PaginatedSearchEngine::search(categories, &view, condition).await
        }
    }

    pub async fn search(
        &self,
        condition: &SearchCondition<CategoryFilter>,
    ) -> DomainResult<Page<CategoryView>> {
        debug!("Category search: {}", condition.summary());
        PaginatedSearchEngine::search(self.repos.categories(), &view, condition).await
    }

    pub async fn find_all(&self) -> DomainResult<Vec<CategoryView>> {
        self.repos.categories().find_all().await
    }

    pub async fn find_active(&self) -> DomainResult<Vec<CategoryView>> {
        self.repos.categories().find_active().await
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<CategoryView> {
        self.load(id).await
    }

    pub async fn create(&self, form: CategoryForm) -> DomainResult<CategoryView> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation("Category name is required".into()));
        }
        self.ensure_name_free(&name, None).await?;

        let mut category = Category::new(name);
        category.description = form.description;
        category.color = form.color;
        category.display_order = form.display_order.unwrap_or(0);
        category.is_active = form.is_active.unwrap_or(true);

        let saved = self.repos.categories().save(category).await?;
        info!("Category created: {} ({})", saved.id, saved.name);
        Ok(saved)
    }

    pub async fn update(&self, id: i64, form: CategoryForm) -> DomainResult<CategoryView> {
        let mut category = self.load(id).await?;

        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation("Category name is required".into()));
        }
        self.ensure_name_free(&name, Some(id)).await?;

        category.name = name;
        category.description = form.description;
        category.color = form.color;
        if let Some(order) = form.display_order {
            category.display_order = order;
        }
        if let Some(active) = form.is_active {
            category.is_active = active;
        }
        category.updated_at = Utc::now();

        let updated = self.repos.categories().update(category).await?;
        info!("Category updated: {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.load(id).await?;
        self.repos.categories().delete(id).await?;
        info!("Category deleted: {}", id);
        Ok(())
    }

    async fn load(&self, id: i64) -> DomainResult<Category> {
        self.repos
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    async fn ensure_name_free(&self, name: &str, current: Option<i64>) -> DomainResult<()> {
        match self.repos.categories().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(DomainError::Conflict(format!("Category '{}'", name)))
            }
            _ => Ok(()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(InMemoryStorage::new()))
    }

    fn form(name: &str) -> CategoryForm {
        CategoryForm {
            name: name.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let service = service();
        let err = service.create(form("General")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_requires_name() {
        let err = service().create(form("   ")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_can_keep_own_name() {
        let service = service();
        let updated = service
            .update(
                2,
                CategoryForm {
                    description: Some("Everyday talk".into()),
                    is_active: Some(false),
                    ..form("General")
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("Everyday talk"));
        assert!(!updated.is_active);
        assert_eq!(updated.display_order, 2);

        let active = service.find_active().await.unwrap();
        assert_eq!(active.len(), 4);
        assert!(active.iter().all(|c| c.id != 2));

        let err = service.update(3, form("General")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn search_by_display_order_range() {
        let service = service();
        let condition = SearchCondition::builder()
            .filter(CategoryFilter {
                min_display_order: Some(2),
                max_display_order: Some(4),
                ..Default::default()
            })
            .sort_by("display_order")
            .sort_direction("ASC")
            .build();
        let page = service.search(&condition).await.unwrap();
        let names: Vec<_> = page.content().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["General", "Question", "Info Sharing"]);
        assert_eq!(page.total_pages(), 1);
    }

    #[tokio::test]
    async fn delete_missing_category_is_not_found() {
        let err = service().delete(77).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
