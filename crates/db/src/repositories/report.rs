//! Report repository.
//!
//! The aggregate queries behind the report endpoints, written as explicit
//! joins instead of per-entity lookups. Each row type mirrors the aliased
//! columns of its query.

use std::sync::Arc;

use crate::entities::{
    Farm, Processing, crop, farm, field, growing_crop_period, machine, processing,
    processing_type, soil,
};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, Order, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
    sea_query::{Expr, Func},
};
use serde::Serialize;
use uuid::Uuid;

/// Machines counted per farm, most-equipped first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct FarmMachineCount {
    /// Farm ID.
    pub farm_id: Uuid,
    /// Farm name.
    pub farm_name: String,
    /// Number of distinct active machines on the farm.
    pub machine_count: i64,
}

/// Distinct fields per farm and crop combination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct FieldCountPerFarmAndCrop {
    /// Farm name.
    pub farm_name: String,
    /// Crop name; absent for fields with no growing-crop period.
    pub crop_name: Option<String>,
    /// Number of distinct fields.
    pub field_count: i64,
}

/// Soil occurrence counts per farm, derived from processed periods.
#[derive(Clone, Debug, PartialEq, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct SoilTypePerFarm {
    /// Farm name.
    pub farm_name: Option<String>,
    /// Soil name.
    pub soil_name: Option<String>,
    /// How often the soil backs a processed field on the farm.
    pub occurrences: i64,
}

/// One processing event joined across the full entity graph.
#[derive(Clone, Debug, PartialEq, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingReportRow {
    /// Operation date.
    pub processing_date: chrono::NaiveDate,
    /// Processing-type name.
    pub processing_type_name: Option<String>,
    /// Field the period grows on.
    pub field_name: Option<String>,
    /// Machine brand.
    pub machine_brand: Option<String>,
    /// Machine model.
    pub machine_model: Option<String>,
    /// Crop being grown.
    pub crop_name: Option<String>,
    /// Soil of the field.
    pub soil_name: Option<String>,
    /// Farm owning the field.
    pub farm_name: Option<String>,
}

/// Read-only aggregate queries across the entity graph.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Top ten farms by distinct active machine count.
    pub async fn farms_with_most_machines(&self) -> AppResult<Vec<FarmMachineCount>> {
        Farm::find()
            .select_only()
            .column_as(farm::Column::Id, "farm_id")
            .column_as(farm::Column::Name, "farm_name")
            .expr_as(
                Func::count_distinct(Expr::col((machine::Entity, machine::Column::Id))),
                "machine_count",
            )
            .join(JoinType::LeftJoin, farm::Relation::Machines.def())
            .filter(farm::Column::DeletedAt.is_null())
            .filter(machine::Column::DeletedAt.is_null())
            .group_by(farm::Column::Id)
            .group_by(farm::Column::Name)
            .order_by(Expr::cust("machine_count"), Order::Desc)
            .limit(10)
            .into_model::<FarmMachineCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Distinct active fields per farm and crop.
    pub async fn field_count_per_farm_and_crop(&self) -> AppResult<Vec<FieldCountPerFarmAndCrop>> {
        Farm::find()
            .select_only()
            .column_as(farm::Column::Name, "farm_name")
            .column_as(crop::Column::Name, "crop_name")
            .expr_as(
                Func::count_distinct(Expr::col((field::Entity, field::Column::Id))),
                "field_count",
            )
            .join(JoinType::LeftJoin, farm::Relation::Fields.def())
            .join(JoinType::LeftJoin, field::Relation::GrowingCropPeriods.def())
            .join(JoinType::LeftJoin, growing_crop_period::Relation::Crop.def())
            .filter(farm::Column::DeletedAt.is_null())
            .group_by(farm::Column::Name)
            .group_by(crop::Column::Name)
            .order_by_asc(farm::Column::Name)
            .into_model::<FieldCountPerFarmAndCrop>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soil occurrence per farm across active processings, most common first.
    pub async fn most_common_soil_per_farm(&self) -> AppResult<Vec<SoilTypePerFarm>> {
        Processing::find()
            .select_only()
            .column_as(farm::Column::Name, "farm_name")
            .column_as(soil::Column::Name, "soil_name")
            .expr_as(
                Expr::col((soil::Entity, soil::Column::Id)).count(),
                "occurrences",
            )
            .join(
                JoinType::LeftJoin,
                processing::Relation::GrowingCropPeriod.def(),
            )
            .join(JoinType::LeftJoin, growing_crop_period::Relation::Field.def())
            .join(JoinType::LeftJoin, field::Relation::Farm.def())
            .join(JoinType::LeftJoin, field::Relation::Soil.def())
            .filter(processing::Column::DeletedAt.is_null())
            .group_by(farm::Column::Name)
            .group_by(soil::Column::Name)
            .order_by(Expr::cust("occurrences"), Order::Desc)
            .into_model::<SoilTypePerFarm>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every active processing joined across the entity graph, by date.
    pub async fn processing_report(&self) -> AppResult<Vec<ProcessingReportRow>> {
        Processing::find()
            .select_only()
            .column_as(processing::Column::Date, "processing_date")
            .column_as(processing_type::Column::Name, "processing_type_name")
            .column_as(field::Column::Name, "field_name")
            .column_as(machine::Column::Brand, "machine_brand")
            .column_as(machine::Column::Model, "machine_model")
            .column_as(crop::Column::Name, "crop_name")
            .column_as(soil::Column::Name, "soil_name")
            .column_as(farm::Column::Name, "farm_name")
            .join(
                JoinType::LeftJoin,
                processing::Relation::GrowingCropPeriod.def(),
            )
            .join(JoinType::LeftJoin, processing::Relation::ProcessingType.def())
            .join(JoinType::LeftJoin, growing_crop_period::Relation::Field.def())
            .join(JoinType::LeftJoin, field::Relation::Soil.def())
            .join(JoinType::LeftJoin, field::Relation::Farm.def())
            .join(JoinType::LeftJoin, processing::Relation::Machine.def())
            .join(JoinType::LeftJoin, growing_crop_period::Relation::Crop.def())
            .filter(processing::Column::DeletedAt.is_null())
            .order_by_asc(processing::Column::Date)
            .into_model::<ProcessingReportRow>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
