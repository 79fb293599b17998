//! Create machine table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Machine::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Machine::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Machine::Brand).string_len(256).not_null())
                    .col(ColumnDef::new(Machine::Model).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Machine::RegisterNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Machine::FarmId).uuid().not_null())
                    .col(
                        ColumnDef::new(Machine::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Machine::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Machine::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_machine_farm")
                            .from(Machine::Table, Machine::FarmId)
                            .to(Farm::Table, Farm::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_machine_register_number")
                    .table(Machine::Table)
                    .col(Machine::RegisterNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_machine_farm_id")
                    .table(Machine::Table)
                    .col(Machine::FarmId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Machine::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Machine {
    Table,
    Id,
    Brand,
    Model,
    RegisterNumber,
    FarmId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Farm {
    Table,
    Id,
}
