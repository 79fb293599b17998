//! Create field table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Field::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Field::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Field::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Field::Boundary).json_binary().not_null())
                    .col(ColumnDef::new(Field::FarmId).uuid().not_null())
                    .col(ColumnDef::new(Field::SoilId).uuid().not_null())
                    .col(
                        ColumnDef::new(Field::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Field::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Field::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_field_farm")
                            .from(Field::Table, Field::FarmId)
                            .to(Farm::Table, Farm::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_field_soil")
                            .from(Field::Table, Field::SoilId)
                            .to(Soil::Table, Soil::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Field names are unique per farm
        manager
            .create_index(
                Index::create()
                    .name("idx_field_farm_id_name")
                    .table(Field::Table)
                    .col(Field::FarmId)
                    .col(Field::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_field_soil_id")
                    .table(Field::Table)
                    .col(Field::SoilId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Field::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Field {
    Table,
    Id,
    Name,
    Boundary,
    FarmId,
    SoilId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Farm {
    Table,
    Id,
}

#[derive(Iden)]
enum Soil {
    Table,
    Id,
}
