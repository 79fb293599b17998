//! Create processing table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Processing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Processing::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Processing::Date).date().not_null())
                    .col(
                        ColumnDef::new(Processing::GrowingCropPeriodId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Processing::ProcessingTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Processing::MachineId).uuid().not_null())
                    .col(
                        ColumnDef::new(Processing::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Processing::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Processing::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_processing_growing_crop_period")
                            .from(Processing::Table, Processing::GrowingCropPeriodId)
                            .to(GrowingCropPeriod::Table, GrowingCropPeriod::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_processing_processing_type")
                            .from(Processing::Table, Processing::ProcessingTypeId)
                            .to(ProcessingType::Table, ProcessingType::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_processing_machine")
                            .from(Processing::Table, Processing::MachineId)
                            .to(Machine::Table, Machine::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_processing_growing_crop_period_id")
                    .table(Processing::Table)
                    .col(Processing::GrowingCropPeriodId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_processing_machine_id")
                    .table(Processing::Table)
                    .col(Processing::MachineId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_processing_date")
                    .table(Processing::Table)
                    .col(Processing::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Processing::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Processing {
    Table,
    Id,
    Date,
    GrowingCropPeriodId,
    ProcessingTypeId,
    MachineId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum GrowingCropPeriod {
    Table,
    Id,
}

#[derive(Iden)]
enum ProcessingType {
    Table,
    Id,
}

#[derive(Iden)]
enum Machine {
    Table,
    Id,
}
