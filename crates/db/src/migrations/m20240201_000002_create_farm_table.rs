//! Create farm table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Farm::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Farm::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Farm::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Farm::Location).json_binary().not_null())
                    .col(
                        ColumnDef::new(Farm::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Farm::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Farm::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_farm_name")
                    .table(Farm::Table)
                    .col(Farm::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Farm::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Farm {
    Table,
    Id,
    Name,
    Location,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
