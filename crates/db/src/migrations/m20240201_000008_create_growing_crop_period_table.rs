//! Create growing crop period table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GrowingCropPeriod::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GrowingCropPeriod::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GrowingCropPeriod::FieldId).uuid().not_null())
                    .col(ColumnDef::new(GrowingCropPeriod::CropId).uuid().not_null())
                    .col(
                        ColumnDef::new(GrowingCropPeriod::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(GrowingCropPeriod::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(GrowingCropPeriod::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_growing_crop_period_field")
                            .from(GrowingCropPeriod::Table, GrowingCropPeriod::FieldId)
                            .to(Field::Table, Field::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_growing_crop_period_crop")
                            .from(GrowingCropPeriod::Table, GrowingCropPeriod::CropId)
                            .to(Crop::Table, Crop::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_growing_crop_period_field_id")
                    .table(GrowingCropPeriod::Table)
                    .col(GrowingCropPeriod::FieldId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_growing_crop_period_crop_id")
                    .table(GrowingCropPeriod::Table)
                    .col(GrowingCropPeriod::CropId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GrowingCropPeriod::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GrowingCropPeriod {
    Table,
    Id,
    FieldId,
    CropId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Field {
    Table,
    Id,
}

#[derive(Iden)]
enum Crop {
    Table,
    Id,
}
