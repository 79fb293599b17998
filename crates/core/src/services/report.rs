//! Report service.

use farmtrack_common::AppResult;
use farmtrack_db::repositories::{
    FarmMachineCount, FieldCountPerFarmAndCrop, ProcessingReportRow, ReportRepository,
    SoilTypePerFarm,
};

/// Read-only aggregate reports across the entity graph.
#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(report_repo: ReportRepository) -> Self {
        Self { report_repo }
    }

    /// Top farms by machine count.
    pub async fn farms_with_most_machines(&self) -> AppResult<Vec<FarmMachineCount>> {
        self.report_repo.farms_with_most_machines().await
    }

    /// Distinct field count per farm and crop.
    pub async fn field_count_per_farm_and_crop(&self) -> AppResult<Vec<FieldCountPerFarmAndCrop>> {
        self.report_repo.field_count_per_farm_and_crop().await
    }

    /// Most common soil type per farm.
    pub async fn most_common_soil_per_farm(&self) -> AppResult<Vec<SoilTypePerFarm>> {
        self.report_repo.most_common_soil_per_farm().await
    }

    /// Full processing report, ordered by date.
    pub async fn processing_report(&self) -> AppResult<Vec<ProcessingReportRow>> {
        self.report_repo.processing_report().await
    }
}
