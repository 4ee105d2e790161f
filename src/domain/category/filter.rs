//! Category-specific search filter

use crate::domain::search::{SearchFilter, SearchType, SortColumn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Description,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryPredicate {
    Active(bool),
    DisplayOrderAtLeast(i32),
    DisplayOrderAtMost(i32),
    DescriptionContains(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySortColumn {
    Id,
    Name,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn for CategorySortColumn {
    const DEFAULT: Self = Self::CreatedAt;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "display_order" | "displayOrder" => Some(Self::DisplayOrder),
            "created_at" | "createdAt" => Some(Self::CreatedAt),
            "updated_at" | "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::DisplayOrder => "display_order",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

const NAME: &[CategoryField] = &[CategoryField::Name];
const DESCRIPTION: &[CategoryField] = &[CategoryField::Description];
const NAME_DESCRIPTION: &[CategoryField] = &[CategoryField::Name, CategoryField::Description];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    pub is_active: Option<bool>,
    pub min_display_order: Option<i32>,
    pub max_display_order: Option<i32>,
    pub description: Option<String>,
}

impl SearchFilter for CategoryFilter {
    type Field = CategoryField;
    type Predicate = CategoryPredicate;
    type SortColumn = CategorySortColumn;

    fn normalize(self) -> Self {
        Self {
            description: self
                .description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ..self
        }
    }

    fn has_filters(&self) -> bool {
        self.is_active.is_some()
            || self.min_display_order.is_some()
            || self.max_display_order.is_some()
            || self.description.is_some()
    }

    /// Title searches map to the name, content searches to the description.
    fn keyword_fields(search_type: SearchType) -> &'static [CategoryField] {
        match search_type {
            SearchType::Title => NAME,
            SearchType::Content => DESCRIPTION,
            SearchType::TitleContent | SearchType::Author => NAME_DESCRIPTION,
        }
    }

    fn predicates(&self) -> Vec<CategoryPredicate> {
        let mut predicates = Vec::new();
        if let Some(active) = self.is_active {
            predicates.push(CategoryPredicate::Active(active));
        }
        if let Some(min) = self.min_display_order {
            predicates.push(CategoryPredicate::DisplayOrderAtLeast(min));
        }
        if let Some(max) = self.max_display_order {
            predicates.push(CategoryPredicate::DisplayOrderAtMost(max));
        }
        if let Some(description) = &self.description {
            predicates.push(CategoryPredicate::DescriptionContains(description.clone()));
        }
        predicates
    }

    fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(active) = self.is_active {
            parts.push(format!("active={active}"));
        }
        if self.min_display_order.is_some() || self.max_display_order.is_some() {
            let fmt = |v: Option<i32>| v.map(|v| v.to_string()).unwrap_or_default();
            parts.push(format!(
                "display_order={}..{}",
                fmt(self.min_display_order),
                fmt(self.max_display_order)
            ));
        }
        if let Some(description) = &self.description {
            parts.push(format!("description~{description}"));
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_not_a_filter() {
        let filter = CategoryFilter {
            description: Some(" \t".into()),
            ..Default::default()
        }
        .normalize();
        assert!(!filter.has_filters());
        assert!(filter.predicates().is_empty());
    }

    #[test]
    fn display_order_range_produces_two_predicates() {
        let filter = CategoryFilter {
            min_display_order: Some(2),
            max_display_order: Some(4),
            ..Default::default()
        };
        assert_eq!(
            filter.predicates(),
            vec![
                CategoryPredicate::DisplayOrderAtLeast(2),
                CategoryPredicate::DisplayOrderAtMost(4)
            ]
        );
        assert_eq!(filter.describe(), vec!["display_order=2..4"]);
    }

    #[test]
    fn sort_names_resolve() {
        assert_eq!(
            CategorySortColumn::resolve("displayOrder"),
            CategorySortColumn::DisplayOrder
        );
        assert_eq!(CategorySortColumn::resolve("color"), CategorySortColumn::CreatedAt);
    }
}
