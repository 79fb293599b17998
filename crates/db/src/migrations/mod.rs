//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20240201_000001_create_user_table;
mod m20240201_000002_create_farm_table;
mod m20240201_000003_create_soil_table;
mod m20240201_000004_create_crop_table;
mod m20240201_000005_create_processing_type_table;
mod m20240201_000006_create_field_table;
mod m20240201_000007_create_machine_table;
mod m20240201_000008_create_growing_crop_period_table;
mod m20240201_000009_create_processing_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240201_000001_create_user_table::Migration),
            Box::new(m20240201_000002_create_farm_table::Migration),
            Box::new(m20240201_000003_create_soil_table::Migration),
            Box::new(m20240201_000004_create_crop_table::Migration),
            Box::new(m20240201_000005_create_processing_type_table::Migration),
            Box::new(m20240201_000006_create_field_table::Migration),
            Box::new(m20240201_000007_create_machine_table::Migration),
            Box::new(m20240201_000008_create_growing_crop_period_table::Migration),
            Box::new(m20240201_000009_create_processing_table::Migration),
        ]
    }
}
