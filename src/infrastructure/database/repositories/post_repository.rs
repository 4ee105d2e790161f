//! SeaORM implementation of PostRepository

use async_trait::async_trait;
use sea_orm::sea_query::Order;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::{debug, info};

use super::{contains_literal, db_err};
use crate::domain::post::{
    Post, PostField, PostFilter, PostPredicate, PostRepository, PostSortColumn, PostStatus,
};
use crate::domain::search::{QuerySpec, SortColumn, SortDirection};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::post;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(p: post::Model) -> Post {
    Post {
        id: p.id,
        title: p.title,
        content: p.content,
        category_id: p.category_id,
        status: match p.status {
            post::PostStatus::Published => PostStatus::Published,
            post::PostStatus::Draft => PostStatus::Draft,
            post::PostStatus::Deleted => PostStatus::Deleted,
        },
        author_name: p.author_name,
        view_count: p.view_count,
        is_notice: p.is_notice,
        created_at: p.created_at,
        updated_at: p.updated_at,
    }
}

fn status_to_entity(s: PostStatus) -> post::PostStatus {
    match s {
        PostStatus::Published => post::PostStatus::Published,
        PostStatus::Draft => post::PostStatus::Draft,
        PostStatus::Deleted => post::PostStatus::Deleted,
    }
}

fn field_column(field: PostField) -> post::Column {
    match field {
        PostField::Title => post::Column::Title,
        PostField::Content => post::Column::Content,
        PostField::AuthorName => post::Column::AuthorName,
    }
}

fn sort_column(column: PostSortColumn) -> post::Column {
    match column {
        PostSortColumn::Id => post::Column::Id,
        PostSortColumn::Title => post::Column::Title,
        PostSortColumn::CreatedAt => post::Column::CreatedAt,
        PostSortColumn::UpdatedAt => post::Column::UpdatedAt,
        PostSortColumn::ViewCount => post::Column::ViewCount,
        PostSortColumn::AuthorName => post::Column::AuthorName,
        PostSortColumn::CategoryId => post::Column::CategoryId,
    }
}

pub(super) fn order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// WHERE clause for a query spec: keyword OR-group AND predicates.
fn condition(spec: &QuerySpec<PostFilter>) -> Condition {
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
            PostPredicate::CategoryIn(ids) => post::Column::CategoryId.is_in(ids.iter().copied()),
            PostPredicate::StatusEq(status) => post::Column::Status.eq(status_to_entity(*status)),
            PostPredicate::AuthorEq(author) => post::Column::AuthorName.eq(author.as_str()),
            PostPredicate::NoticeEq(notice) => post::Column::IsNotice.eq(*notice),
            PostPredicate::CreatedFrom(from) => post::Column::CreatedAt.gte(*from),
            PostPredicate::CreatedBefore(before) => post::Column::CreatedAt.lt(*before),
        });
    }

    condition
}

fn filtered(spec: &QuerySpec<PostFilter>) -> Select<post::Entity> {
    post::Entity::find().filter(condition(spec))
}

// ── SeaOrmPostRepository ────────────────────────────────────────

pub struct SeaOrmPostRepository {
    db: DatabaseConnection,
}

impl SeaOrmPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_page(&self, spec: &QuerySpec<PostFilter>) -> DomainResult<Vec<Post>> {
        let direction = order(spec.order.direction);
        debug!(
            "Post page: order={} {} offset={} limit={}",
            spec.order.column.name(),
            spec.order.direction,
            spec.offset,
            spec.limit
        );

        let models = filtered(spec)
            .order_by(sort_column(spec.order.column), direction.clone())
            .order_by(post::Column::Id, direction)
            .offset(spec.offset)
            .limit(spec.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count(&self, spec: &QuerySpec<PostFilter>) -> DomainResult<u64> {
        filtered(spec).count(&self.db).await.map_err(db_err)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>> {
        let model = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn save(&self, p: Post) -> DomainResult<Post> {
        let model = post::ActiveModel {
            title: Set(p.title),
            content: Set(p.content),
            category_id: Set(p.category_id),
            status: Set(status_to_entity(p.status)),
            author_name: Set(p.author_name),
            view_count: Set(p.view_count),
            is_notice: Set(p.is_notice),
            created_at: Set(p.created_at),
            updated_at: Set(p.updated_at),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Post saved: {} ({})", result.title, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, p: Post) -> DomainResult<Post> {
        let existing = post::Entity::find_by_id(p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Post", p.id));
        }

        let model = post::ActiveModel {
            id: Set(p.id),
            title: Set(p.title),
            content: Set(p.content),
            category_id: Set(p.category_id),
            status: Set(status_to_entity(p.status)),
            author_name: Set(p.author_name),
            view_count: Set(p.view_count),
            is_notice: Set(p.is_notice),
            created_at: Set(p.created_at),
            updated_at: Set(p.updated_at),
        };
        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(entity_to_domain(result))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Post", id));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::search::{RecordLookup, SearchCondition};
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::storage::InMemoryStorage;

    async fn repo() -> SeaOrmPostRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmPostRepository::new(db)
    }

    fn post(title: &str, author: &str, category: i64, day: u32) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap();
        Post {
            category_id: Some(category),
            author_name: author.into(),
            created_at: at,
            updated_at: at,
            ..Post::new(title, format!("about {title}"))
        }
    }

    async fn seeded() -> SeaOrmPostRepository {
        let repo = repo().await;
        for p in [
            post("Rust ownership", "kim", 2, 1),
            post("Axum extractors", "lee", 3, 2),
            post("SeaORM migrations", "kim", 2, 3),
            post("Tokio runtime", "park", 4, 4),
            post("Rust traits", "lee", 1, 5),
        ] {
            repo.save(p).await.unwrap();
        }
        repo
    }

    fn spec(condition: SearchCondition<PostFilter>) -> QuerySpec<PostFilter> {
        QuerySpec::from_condition(&condition)
    }

    #[tokio::test]
    async fn save_assigns_id_and_round_trips() {
        let repo = repo().await;
        let saved = repo.save(post("hello", "kim", 2, 1)).await.unwrap();
        assert!(saved.id > 0);

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.title, "hello");
        assert_eq!(found.status, PostStatus::Published);
        assert_eq!(found.category_id, Some(2));
    }

    #[tokio::test]
    async fn keyword_matches_title_or_content() {
        let repo = seeded().await;
        let (rows, total) = (&repo as &dyn PostRepository)
            .lookup(&spec(SearchCondition::builder().keyword("rust").build()))
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(rows[0].title, "Rust traits");
        assert_eq!(rows[1].title, "Rust ownership");
    }

    #[tokio::test]
    async fn like_wildcards_match_literally_like_memory_storage() {
        let sqlite = repo().await;
        let memory = InMemoryStorage::new();
        for title in ["100% pure", "1000 items", "a_b", "axb", "back\\slash"] {
            sqlite.save(post(title, "kim", 2, 1)).await.unwrap();
            memory.posts().save(post(title, "kim", 2, 1)).await.unwrap();
        }

        for (keyword, expected) in [("100%", 1), ("a_b", 1), ("%", 1), ("_", 1), ("\\", 1), ("0", 2)] {
            let condition = SearchCondition::builder()
                .keyword(keyword)
                .search_type("title")
                .build();
            let query = spec(condition);
            let on_sqlite = sqlite.count(&query).await.unwrap();
            let in_memory = memory.posts().count(&query).await.unwrap();
            assert_eq!(on_sqlite, expected, "sqlite, keyword {keyword:?}");
            assert_eq!(in_memory, expected, "memory, keyword {keyword:?}");
        }
    }

    #[tokio::test]
    async fn category_and_author_filters() {
        let repo = seeded().await;
        let condition = SearchCondition::builder()
            .filter(PostFilter {
                category_ids: vec![2, 3],
                author_name: Some("kim".into()),
                ..Default::default()
            })
            .build();
        assert_eq!(repo.count(&spec(condition)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn date_range_includes_end_day() {
        let repo = seeded().await;
        let condition = SearchCondition::builder()
            .filter(PostFilter {
                start_date: NaiveDate::from_ymd_opt(2024, 5, 2),
                end_date: NaiveDate::from_ymd_opt(2024, 5, 4),
                ..Default::default()
            })
            .sort_by("created_at")
            .sort_direction("asc")
            .build();
        let rows = repo.find_page(&spec(condition)).await.unwrap();
        let titles: Vec<_> = rows.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Axum extractors", "SeaORM migrations", "Tokio runtime"]);
    }

    #[tokio::test]
    async fn pages_with_offset_and_limit() {
        let repo = seeded().await;
        let condition = SearchCondition::<PostFilter>::builder()
            .page(2)
            .size(2)
            .sort_by("title")
            .sort_direction("asc")
            .build();
        let rows = repo.find_page(&QuerySpec::listing(&condition)).await.unwrap();
        let titles: Vec<_> = rows.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Rust traits", "SeaORM migrations"]);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repo = seeded().await;
        let mut p = repo.find_by_id(1).await.unwrap().unwrap();
        p.title = "Rust borrowing".into();
        p.status = PostStatus::Draft;
        let updated = repo.update(p).await.unwrap();
        assert_eq!(updated.title, "Rust borrowing");
        assert_eq!(updated.status, PostStatus::Draft);

        repo.delete(1).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(1).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
