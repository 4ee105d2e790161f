//! Create categories table

use sea_orm_migration::prelude::*;

/// Seeded rows: `(name, description, color)`; ids and display order follow
/// the slice order.
const SEED: [(&str, &str, &str); 5] = [
    ("Notice", "Announcements from the board operators", "#dc3545"),
    ("General", "Everyday posts", "#0d6efd"),
    ("Question", "Questions and answers", "#198754"),
    ("Info Sharing", "Links, tips and useful information", "#fd7e14"),
    ("Free Board", "Anything goes", "#6c757d"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Description).string())
                    .col(ColumnDef::new(Categories::Color).string_len(20))
                    .col(
                        ColumnDef::new(Categories::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Categories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categories_name")
                    .table(Categories::Table)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        let now = chrono::Utc::now();
        let mut insert = Query::insert()
            .into_table(Categories::Table)
            .columns([
                Categories::Id,
                Categories::Name,
                Categories::Description,
                Categories::Color,
                Categories::DisplayOrder,
                Categories::IsActive,
                Categories::CreatedAt,
                Categories::UpdatedAt,
            ])
            .to_owned();
        for (i, (name, description, color)) in SEED.iter().enumerate() {
            let order = i as i32 + 1;
            insert.values_panic([
                i64::from(order).into(),
                (*name).into(),
                (*description).into(),
                (*color).into(),
                order.into(),
                true.into(),
                now.into(),
                now.into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Description,
    Color,
    DisplayOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
