//! SeaORM entities.

pub mod crop;
pub mod farm;
pub mod field;
pub mod geo;
pub mod growing_crop_period;
pub mod machine;
pub mod processing;
pub mod processing_type;
pub mod soil;
pub mod user;

pub use crop::Entity as Crop;
pub use farm::Entity as Farm;
pub use field::Entity as Field;
pub use geo::{GeoPoint, GeoPolygon};
pub use growing_crop_period::Entity as GrowingCropPeriod;
pub use machine::Entity as Machine;
pub use processing::Entity as Processing;
pub use processing_type::Entity as ProcessingType;
pub use soil::Entity as Soil;
pub use user::Entity as User;
