//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod category_repository;
pub mod post_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::ColumnTrait;

use crate::domain::DomainError;

const LIKE_ESCAPE: char = '\\';

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

/// `column LIKE '%text%' ESCAPE '\'` with `%`, `_` and `\` in `text` matched
/// literally.
fn contains_literal<C: ColumnTrait>(column: C, text: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    Expr::col((column.entity_name(), column)).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

