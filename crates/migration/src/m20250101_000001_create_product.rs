//! Create `product` table.
//! Identifiers are 24-char hex object ids assigned by the application, not the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(string_len(Product::Id, 24).primary_key())
                    .col(string_len(Product::Name, 100).not_null())
                    .col(text_null(Product::Description))
                    .col(double(Product::Price).not_null())
                    .col(string_len(Product::Category, 50).not_null())
                    .col(big_integer(Product::Stock).not_null().default(0))
                    .col(timestamp_with_time_zone_null(Product::ReleaseDate))
                    .col(timestamp_with_time_zone(Product::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Product::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Product {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    Stock,
    ReleaseDate,
    CreatedAt,
    UpdatedAt,
}
