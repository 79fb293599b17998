//! Create crop table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Crop::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Crop::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Crop::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Crop::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Crop::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Crop::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crop_name")
                    .table(Crop::Table)
                    .col(Crop::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Crop::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Crop {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
