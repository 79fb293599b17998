//! Create soil table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Soil::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Soil::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Soil::Name).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Soil::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Soil::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Soil::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_soil_name")
                    .table(Soil::Table)
                    .col(Soil::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Soil::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Soil {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
