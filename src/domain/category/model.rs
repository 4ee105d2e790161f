//! Category domain entity

use chrono::{DateTime, Utc};

/// Board category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    /// Unique
    pub name: String,
    pub description: Option<String>,
    /// CSS color used by listing views
    pub color: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Unsaved category; the repository assigns the id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: None,
            color: None,
            display_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

pub const UNCLASSIFIED: &str = "Unclassified";

/// Seeded categories: `(id, name)`.
pub const DEFAULT_CATEGORIES: [(i64, &str); 5] = [
    (1, "Notice"),
    (2, "General"),
    (3, "Question"),
    (4, "Info Sharing"),
    (5, "Free Board"),
];

/// Category every new post lands in unless told otherwise.
pub const DEFAULT_POST_CATEGORY: i64 = 2;

/// Display name of a category id from the fixed table.
pub fn display_name(category_id: Option<i64>) -> &'static str {
    category_id
        .and_then(|id| DEFAULT_CATEGORIES.iter().find(|(known, _)| *known == id))
        .map(|(_, name)| *name)
        .unwrap_or(UNCLASSIFIED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_have_fixed_names() {
        assert_eq!(display_name(Some(1)), "Notice");
        assert_eq!(display_name(Some(4)), "Info Sharing");
        assert_eq!(display_name(Some(5)), "Free Board");
    }

    #[test]
    fn unknown_or_missing_id_is_unclassified() {
        assert_eq!(display_name(Some(6)), "Unclassified");
        assert_eq!(display_name(Some(0)), "Unclassified");
        assert_eq!(display_name(None), "Unclassified");
    }
}
