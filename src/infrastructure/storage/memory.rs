//! In-memory storage implementation

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::category::{
    CategoryField, CategoryPredicate, CategorySortColumn, DEFAULT_CATEGORIES,
};
use crate::domain::post::{PostField, PostPredicate, PostSortColumn};
use crate::domain::search::{QuerySpec, SortDirection};
use crate::domain::{
    Category, CategoryFilter, CategoryRepository, DomainError, DomainResult, Post, PostFilter,
    PostRepository, RepositoryProvider,
};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    posts: DashMap<i64, Post>,
    categories: DashMap<i64, Category>,
    post_counter: AtomicI64,
    category_counter: AtomicI64,
}

impl InMemoryStorage {
    /// Empty post table, seeded categories.
    pub fn new() -> Self {
        let storage = Self {
            posts: DashMap::new(),
            categories: DashMap::new(),
            post_counter: AtomicI64::new(1),
            category_counter: AtomicI64::new(1),
        };

        for (order, (id, name)) in DEFAULT_CATEGORIES.iter().enumerate() {
            let mut category = Category::new(*name);
            category.id = *id;
            category.display_order = order as i32 + 1;
            storage.categories.insert(*id, category);
        }
        storage
            .category_counter
            .store(DEFAULT_CATEGORIES.len() as i64 + 1, Ordering::SeqCst);

        storage
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn posts(&self) -> &dyn PostRepository {
        self
    }

    fn categories(&self) -> &dyn CategoryRepository {
        self
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn directed(ordering: CmpOrdering, direction: SortDirection) -> CmpOrdering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

// ── Posts ───────────────────────────────────────────────────────

fn post_matches(post: &Post, spec: &QuerySpec<PostFilter>) -> bool {
    if let Some(search) = &spec.keyword {
        let hit = search.fields.iter().any(|field| {
            let text = match field {
                PostField::Title => &post.title,
                PostField::Content => &post.content,
                PostField::AuthorName => &post.author_name,
            };
            contains_ignore_case(text, &search.keyword)
        });
        if !hit {
            return false;
        }
    }

    spec.predicates.iter().all(|predicate| match predicate {
        PostPredicate::CategoryIn(ids) => post.category_id.is_some_and(|id| ids.contains(&id)),
        PostPredicate::StatusEq(status) => post.status == *status,
        PostPredicate::AuthorEq(author) => post.author_name == *author,
        PostPredicate::NoticeEq(notice) => post.is_notice == *notice,
        PostPredicate::CreatedFrom(from) => post.created_at >= *from,
        PostPredicate::CreatedBefore(before) => post.created_at < *before,
    })
}

fn compare_posts(a: &Post, b: &Post, column: PostSortColumn) -> CmpOrdering {
    match column {
        PostSortColumn::Id => a.id.cmp(&b.id),
        PostSortColumn::Title => a.title.cmp(&b.title),
        PostSortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        PostSortColumn::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        PostSortColumn::ViewCount => a.view_count.cmp(&b.view_count),
        PostSortColumn::AuthorName => a.author_name.cmp(&b.author_name),
        PostSortColumn::CategoryId => a.category_id.cmp(&b.category_id),
    }
}

#[async_trait]
impl PostRepository for InMemoryStorage {
    async fn find_page(&self, spec: &QuerySpec<PostFilter>) -> DomainResult<Vec<Post>> {
        let mut rows: Vec<Post> = self
            .posts
            .iter()
            .filter(|e| post_matches(e.value(), spec))
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            directed(compare_posts(a, b, spec.order.column), spec.order.direction)
                .then_with(|| directed(a.id.cmp(&b.id), spec.order.direction))
        });
        Ok(rows
            .into_iter()
            .skip(spec.offset as usize)
            .take(spec.limit as usize)
            .collect())
    }

    async fn count(&self, spec: &QuerySpec<PostFilter>) -> DomainResult<u64> {
        Ok(self
            .posts
            .iter()
            .filter(|e| post_matches(e.value(), spec))
            .count() as u64)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.clone()))
    }

    async fn save(&self, mut post: Post) -> DomainResult<Post> {
        post.id = self.post_counter.fetch_add(1, Ordering::SeqCst);
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> DomainResult<Post> {
        let mut entry = self
            .posts
            .get_mut(&post.id)
            .ok_or_else(|| DomainError::not_found("Post", post.id))?;
        *entry = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.posts
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Post", id))?;
        Ok(())
    }
}

// ── Categories ──────────────────────────────────────────────────

fn category_matches(category: &Category, spec: &QuerySpec<CategoryFilter>) -> bool {
    if let Some(search) = &spec.keyword {
        let hit = search.fields.iter().any(|field| match field {
            CategoryField::Name => contains_ignore_case(&category.name, &search.keyword),
            CategoryField::Description => category
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, &search.keyword)),
        });
        if !hit {
            return false;
        }
    }

    spec.predicates.iter().all(|predicate| match predicate {
        CategoryPredicate::Active(active) => category.is_active == *active,
        CategoryPredicate::DisplayOrderAtLeast(min) => category.display_order >= *min,
        CategoryPredicate::DisplayOrderAtMost(max) => category.display_order <= *max,
        CategoryPredicate::DescriptionContains(text) => category
            .description
            .as_deref()
            .is_some_and(|d| contains_ignore_case(d, text)),
    })
}

fn compare_categories(a: &Category, b: &Category, column: CategorySortColumn) -> CmpOrdering {
    match column {
        CategorySortColumn::Id => a.id.cmp(&b.id),
        CategorySortColumn::Name => a.name.cmp(&b.name),
        CategorySortColumn::DisplayOrder => a.display_order.cmp(&b.display_order),
        CategorySortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        CategorySortColumn::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

impl InMemoryStorage {
    fn categories_by_display_order(&self, active_only: bool) -> Vec<Category> {
        let mut rows: Vec<Category> = self
            .categories
            .iter()
            .filter(|e| !active_only || e.value().is_active)
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|c| (c.display_order, c.id));
        rows
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStorage {
    async fn find_page(&self, spec: &QuerySpec<CategoryFilter>) -> DomainResult<Vec<Category>> {
        let mut rows: Vec<Category> = self
            .categories
            .iter()
            .filter(|e| category_matches(e.value(), spec))
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by(|a, b| {
            directed(compare_categories(a, b, spec.order.column), spec.order.direction)
                .then_with(|| directed(a.id.cmp(&b.id), spec.order.direction))
        });
        Ok(rows
            .into_iter()
            .skip(spec.offset as usize)
            .take(spec.limit as usize)
            .collect())
    }

    async fn count(&self, spec: &QuerySpec<CategoryFilter>) -> DomainResult<u64> {
        Ok(self
            .categories
            .iter()
            .filter(|e| category_matches(e.value(), spec))
            .count() as u64)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Category>> {
        Ok(self.categories.get(&id).map(|c| c.clone()))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Category>> {
        Ok(self
            .categories
            .iter()
            .find(|e| e.value().name == name)
            .map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories_by_display_order(false))
    }

    async fn find_active(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories_by_display_order(true))
    }

    async fn save(&self, mut category: Category) -> DomainResult<Category> {
        if self.categories.iter().any(|e| e.value().name == category.name) {
            return Err(DomainError::Conflict(format!("Category '{}'", category.name)));
        }
        category.id = self.category_counter.fetch_add(1, Ordering::SeqCst);
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> DomainResult<Category> {
        let taken = self
            .categories
            .iter()
            .any(|e| e.value().name == category.name && e.value().id != category.id);
        if taken {
            return Err(DomainError::Conflict(format!("Category '{}'", category.name)));
        }
        let mut entry = self
            .categories
            .get_mut(&category.id)
            .ok_or_else(|| DomainError::not_found("Category", category.id))?;
        *entry = category.clone();
        Ok(category)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.categories
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Category", id))?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::{RecordLookup, SearchCondition};

    async fn seed(storage: &InMemoryStorage) {
        for (title, author, category) in [
            ("Rust async", "kim", 2),
            ("Axum routing", "lee", 3),
            ("SeaORM tips", "kim", 2),
        ] {
            let mut post = Post::new(title, format!("{title} body"));
            post.author_name = author.into();
            post.category_id = Some(category);
            PostRepository::save(storage, post).await.unwrap();
        }
    }

    #[tokio::test]
    async fn seeds_default_categories() {
        let storage = InMemoryStorage::new();
        let all = storage.categories().find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Notice", "General", "Question", "Info Sharing", "Free Board"]);

        let created = CategoryRepository::save(&storage, Category::new("Events"))
            .await
            .unwrap();
        assert_eq!(created.id, 6);
    }

    #[tokio::test]
    async fn lookup_filters_and_counts() {
        let storage = InMemoryStorage::new();
        seed(&storage).await;

        let condition = SearchCondition::builder()
            .keyword("RUST")
            .search_type("title")
            .build();
        let spec = QuerySpec::<PostFilter>::from_condition(&condition);
        let (rows, total) = storage.posts().lookup(&spec).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].title, "Rust async");

        let condition = SearchCondition::builder()
            .filter(PostFilter {
                author_name: Some("kim".into()),
                ..Default::default()
            })
            .sort_by("title")
            .sort_direction("asc")
            .build();
        let spec = QuerySpec::from_condition(&condition);
        let (rows, total) = storage.posts().lookup(&spec).await.unwrap();
        assert_eq!(total, 2);
        let titles: Vec<_> = rows.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Rust async", "SeaORM tips"]);
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts() {
        let storage = InMemoryStorage::new();
        let err = CategoryRepository::save(&storage, Category::new("General"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let storage = InMemoryStorage::new();
        let err = storage.posts().delete(99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
