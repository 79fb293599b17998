//! Field entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::geo::GeoPolygon;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "field")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Unique within its farm.
    pub name: String,

    /// GeoJSON polygon outlining the field.
    #[sea_orm(column_type = "JsonBinary")]
    pub boundary: GeoPolygon,

    pub farm_id: Uuid,

    pub soil_id: Uuid,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::farm::Entity",
        from = "Column::FarmId",
        to = "super::farm::Column::Id"
    )]
    Farm,

    #[sea_orm(
        belongs_to = "super::soil::Entity",
        from = "Column::SoilId",
        to = "super::soil::Column::Id"
    )]
    Soil,

    #[sea_orm(has_many = "super::growing_crop_period::Entity")]
    GrowingCropPeriods,
}

impl Related<super::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl Related<super::soil::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Soil.def()
    }
}

impl Related<super::growing_crop_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GrowingCropPeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
