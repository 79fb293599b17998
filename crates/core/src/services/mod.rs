//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod crop;
pub mod farm;
pub mod field;
pub mod growing_crop_period;
pub mod machine;
pub mod processing;
pub mod processing_type;
pub mod report;
pub mod soil;

pub use auth::{AuthService, Claims, LoginInput, RegisterInput, UpdateUserRoleInput};
pub use crop::{CreateCropInput, CropService, UpdateCropInput};
pub use farm::{CreateFarmInput, FarmService, UpdateFarmInput};
pub use field::{CreateFieldInput, FieldService, UpdateFieldInput};
pub use growing_crop_period::{CreateGrowingCropPeriodInput, GrowingCropPeriodService};
pub use machine::{CreateMachineInput, MachineService, UpdateMachineInput};
pub use processing::{CreateProcessingInput, ProcessingService, UpdateProcessingInput};
pub use processing_type::{
    CreateProcessingTypeInput, ProcessingTypeService, UpdateProcessingTypeInput,
};
pub use report::ReportService;
pub use soil::{CreateSoilInput, SoilService, UpdateSoilInput};
