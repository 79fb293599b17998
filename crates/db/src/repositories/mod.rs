//! Repository layer: typed CRUD and the filtered queries each service needs.

mod crop;
mod farm;
mod field;
mod growing_crop_period;
mod machine;
mod processing;
mod processing_type;
mod report;
mod soil;
mod user;

pub use crop::CropRepository;
pub use farm::FarmRepository;
pub use field::FieldRepository;
pub use growing_crop_period::GrowingCropPeriodRepository;
pub use machine::MachineRepository;
pub use processing::ProcessingRepository;
pub use processing_type::ProcessingTypeRepository;
pub use report::{
    FarmMachineCount, FieldCountPerFarmAndCrop, ProcessingReportRow, ReportRepository,
    SoilTypePerFarm,
};
pub use soil::SoilRepository;
pub use user::UserRepository;
