//! Processing entity: an agricultural operation applied to a
//! growing-crop period with a specific machine on a specific date.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "processing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub date: Date,

    pub growing_crop_period_id: Uuid,

    pub processing_type_id: Uuid,

    pub machine_id: Uuid,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::growing_crop_period::Entity",
        from = "Column::GrowingCropPeriodId",
        to = "super::growing_crop_period::Column::Id"
    )]
    GrowingCropPeriod,

    #[sea_orm(
        belongs_to = "super::processing_type::Entity",
        from = "Column::ProcessingTypeId",
        to = "super::processing_type::Column::Id"
    )]
    ProcessingType,

    #[sea_orm(
        belongs_to = "super::machine::Entity",
        from = "Column::MachineId",
        to = "super::machine::Column::Id"
    )]
    Machine,
}

impl Related<super::growing_crop_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GrowingCropPeriod.def()
    }
}

impl Related<super::processing_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProcessingType.def()
    }
}

impl Related<super::machine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Machine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
