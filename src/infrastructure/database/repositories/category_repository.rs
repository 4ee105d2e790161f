//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::info;

use super::{contains_literal, db_err};
use super::post_repository::order;
use crate::domain::category::{
    Category, CategoryField, CategoryFilter, CategoryPredicate, CategoryRepository,
    CategorySortColumn,
};
use crate::domain::search::QuerySpec;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::category;

fn entity_to_domain(c: category::Model) -> Category {
    Category {
        id: c.id,
        name: c.name,
        description: c.description,
        color: c.color,
        display_order: c.display_order,
        is_active: c.is_active,
        created_at: c.created_at,
        updated_at: c.updated_at,
    }
}

fn unique_violation(name: &str, e: sea_orm::DbErr) -> DomainError {
    if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
        DomainError::Conflict(format!("Category '{}'", name))
    } else {
        db_err(e)
    }
}

fn field_column(field: CategoryField) -> category::Column {
    match field {
        CategoryField::Name => category::Column::Name,
        CategoryField::Description => category::Column::Description,
    }
}

fn sort_column(column: CategorySortColumn) -> category::Column {
    match column {
        CategorySortColumn::Id => category::Column::Id,
        CategorySortColumn::Name => category::Column::Name,
        CategorySortColumn::DisplayOrder => category::Column::DisplayOrder,
        CategorySortColumn::CreatedAt => category::Column::CreatedAt,
        CategorySortColumn::UpdatedAt => category::Column::UpdatedAt,
    }
}

fn condition(spec: &QuerySpec<CategoryFilter>) -> Condition {
    let mut condition = Condition::all();

    if let Some(search) = &spec.keyword {
        let keyword = search
            .fields
            .iter()
            .fold(Condition::any(), |any, field| {
                any.add(contains_literal(field_column(*field), &search.keyword))
            });
        condition = condition.add(keyword);
    }

    for predicate in &spec.predicates {
        condition = condition.add(match predicate {
            CategoryPredicate::Active(active) => category::Column::IsActive.eq(*active),
            CategoryPredicate::DisplayOrderAtLeast(min) => category::Column::DisplayOrder.gte(*min),
            CategoryPredicate::DisplayOrderAtMost(max) => category::Column::DisplayOrder.lte(*max),
            CategoryPredicate::DescriptionContains(text) => {
                contains_literal(category::Column::Description, text)
            }
        });
    }

    condition
}

fn filtered(spec: &QuerySpec<CategoryFilter>) -> Select<category::Entity> {
    category::Entity::find().filter(condition(spec))
}

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn by_display_order(&self, active_only: bool) -> DomainResult<Vec<Category>> {
        let mut query = category::Entity::find();
        if active_only {
            query = query.filter(category::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(category::Column::DisplayOrder)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_page(&self, spec: &QuerySpec<CategoryFilter>) -> DomainResult<Vec<Category>> {
        let direction = order(spec.order.direction);
        let models = filtered(spec)
            .order_by(sort_column(spec.order.column), direction.clone())
            .order_by(category::Column::Id, direction)
            .offset(spec.offset)
            .limit(spec.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count(&self, spec: &QuerySpec<CategoryFilter>) -> DomainResult<u64> {
        filtered(spec).count(&self.db).await.map_err(db_err)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Category>> {
        let model = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        self.by_display_order(false).await
    }

    async fn find_active(&self) -> DomainResult<Vec<Category>> {
        self.by_display_order(true).await
    }

    async fn save(&self, c: Category) -> DomainResult<Category> {
        let name = c.name.clone();
        let model = category::ActiveModel {
            name: Set(c.name),
            description: Set(c.description),
            color: Set(c.color),
            display_order: Set(c.display_order),
            is_active: Set(c.is_active),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
            ..Default::default()
        };
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation(&name, e))?;
        info!("Category saved: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, c: Category) -> DomainResult<Category> {
        let existing = category::Entity::find_by_id(c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Category", c.id));
        }

        let name = c.name.clone();
        let model = category::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            description: Set(c.description),
            color: Set(c.color),
            display_order: Set(c.display_order),
            is_active: Set(c.is_active),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
        };
        let result = model
            .update(&self.db)
            .await
            .map_err(|e| unique_violation(&name, e))?;
        Ok(entity_to_domain(result))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Category", id));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::search::SearchCondition;
    use crate::infrastructure::database::migrator::Migrator;

    async fn repo() -> SeaOrmCategoryRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmCategoryRepository::new(db)
    }

    #[tokio::test]
    async fn migration_seeds_five_categories() {
        let repo = repo().await;
        let all = repo.find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Notice", "General", "Question", "Info Sharing", "Free Board"]);
        assert_eq!(all[1].id, 2);
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let repo = repo().await;
        let err = repo.save(Category::new("Question")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn inactive_categories_are_hidden_from_active_list() {
        let repo = repo().await;
        let mut notice = repo.find_by_id(1).await.unwrap().unwrap();
        notice.is_active = false;
        repo.update(notice).await.unwrap();

        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 4);
        assert_eq!(active[0].name, "General");

        let condition = SearchCondition::builder()
            .filter(CategoryFilter {
                is_active: Some(false),
                ..Default::default()
            })
            .build();
        let spec = QuerySpec::from_condition(&condition);
        assert_eq!(repo.count(&spec).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn keyword_searches_name_and_description() {
        let repo = repo().await;
        let condition = SearchCondition::<CategoryFilter>::builder()
            .keyword("answers")
            .sort_by("display_order")
            .sort_direction("asc")
            .build();
        let rows = repo
            .find_page(&QuerySpec::from_condition(&condition))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Question");
    }

    #[tokio::test]
    async fn description_filter_treats_wildcards_literally() {
        let repo = repo().await;
        let mut sale = Category::new("Sales");
        sale.description = Some("50% off".into());
        repo.save(sale).await.unwrap();
        let mut snake = Category::new("Snake");
        snake.description = Some("snake_case names".into());
        repo.save(snake).await.unwrap();

        for (text, expected) in [("50%", 1), ("%", 1), ("e_c", 1), ("_", 1)] {
            let condition = SearchCondition::builder()
                .filter(CategoryFilter {
                    description: Some(text.into()),
                    ..Default::default()
                })
                .build();
            let spec = QuerySpec::from_condition(&condition);
            assert_eq!(repo.count(&spec).await.unwrap(), expected, "description {text:?}");
        }
    }

    #[tokio::test]
    async fn save_and_delete() {
        let repo = repo().await;
        let saved = repo.save(Category::new("Events")).await.unwrap();
        assert_eq!(saved.id, 6);
        assert!(repo.find_by_name("Events").await.unwrap().is_some());

        repo.delete(saved.id).await.unwrap();
        assert!(matches!(
            repo.delete(saved.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
