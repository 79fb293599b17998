//! Growing-crop-period service.

use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{growing_crop_period, user::UserRole},
    repositories::{
        CropRepository, FieldRepository, GrowingCropPeriodRepository, ProcessingRepository,
    },
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;

/// Growing-crop-period service for business logic.
#[derive(Clone)]
pub struct GrowingCropPeriodService {
    period_repo: GrowingCropPeriodRepository,
    field_repo: FieldRepository,
    crop_repo: CropRepository,
    processing_repo: ProcessingRepository,
}

/// Input for creating a growing-crop period.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrowingCropPeriodInput {
    pub field_id: Uuid,
    pub crop_id: Uuid,
}

impl GrowingCropPeriodService {
    /// Create a new growing-crop-period service.
    #[must_use]
    pub const fn new(
        period_repo: GrowingCropPeriodRepository,
        field_repo: FieldRepository,
        crop_repo: CropRepository,
        processing_repo: ProcessingRepository,
    ) -> Self {
        Self {
            period_repo,
            field_repo,
            crop_repo,
            processing_repo,
        }
    }

    /// Link a field and a crop into a new period.
    pub async fn create(
        &self,
        input: CreateGrowingCropPeriodInput,
    ) -> AppResult<growing_crop_period::Model> {
        let field = self
            .field_repo
            .find_by_id(input.field_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Field with id {} not found", input.field_id))
            })?;

        let crop = self
            .crop_repo
            .find_by_id(input.crop_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Crop with id {} not found", input.crop_id))
            })?;

        let model = growing_crop_period::ActiveModel {
            id: Set(Uuid::new_v4()),
            field_id: Set(field.id),
            crop_id: Set(crop.id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.period_repo.create(model).await
    }

    /// All active periods.
    pub async fn list(&self) -> AppResult<Vec<growing_crop_period::Model>> {
        let periods = self.period_repo.find_all().await?;
        if periods.is_empty() {
            return Err(AppError::NotFound(
                "No growing crop periods found".to_string(),
            ));
        }
        Ok(periods)
    }

    /// Get an active period by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<growing_crop_period::Model> {
        self.period_repo.get_by_id(id).await
    }

    /// Soft-delete a period with no recorded processings.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<growing_crop_period::Model> {
        let period = self.period_repo.get_by_id(id).await?;
        self.ensure_no_children(period.id).await?;
        self.period_repo.soft_delete(period).await
    }

    /// Permanently remove a period. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let period = self
            .period_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Growing crop period with id {id} not found"))
            })?;

        self.ensure_no_children(period.id).await?;
        self.period_repo.delete(period).await
    }

    async fn ensure_no_children(&self, period_id: Uuid) -> AppResult<()> {
        if self
            .processing_repo
            .find_any_by_growing_crop_period(period_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Growing crop period has recorded processings and cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use farmtrack_db::entities::{GeoPolygon, crop, field, processing};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_field(farm_id: Uuid) -> field::Model {
        field::Model {
            id: Uuid::new_v4(),
            name: "North 40".to_string(),
            boundary: GeoPolygon {
                kind: "Polygon".into(),
                coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
            },
            farm_id,
            soil_id: Uuid::new_v4(),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn create_test_crop(name: &str) -> crop::Model {
        crop::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn create_test_period(field_id: Uuid, crop_id: Uuid) -> growing_crop_period::Model {
        growing_crop_period::Model {
            id: Uuid::new_v4(),
            field_id,
            crop_id,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn empty_mock() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn create_test_service(
        period_db: Arc<DatabaseConnection>,
        field_db: Arc<DatabaseConnection>,
        crop_db: Arc<DatabaseConnection>,
        processing_db: Arc<DatabaseConnection>,
    ) -> GrowingCropPeriodService {
        GrowingCropPeriodService::new(
            GrowingCropPeriodRepository::new(period_db),
            FieldRepository::new(field_db),
            CropRepository::new(crop_db),
            ProcessingRepository::new(processing_db),
        )
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_not_found() {
        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<field::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(empty_mock(), field_db, empty_mock(), empty_mock());

        let result = service
            .create(CreateGrowingCropPeriodInput {
                field_id: Uuid::new_v4(),
                crop_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_with_missing_crop_is_not_found() {
        let field = create_test_field(Uuid::new_v4());

        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field]])
                .into_connection(),
        );
        let crop_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<crop::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(empty_mock(), field_db, crop_db, empty_mock());

        let result = service
            .create(CreateGrowingCropPeriodInput {
                field_id: Uuid::new_v4(),
                crop_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_links_field_and_crop() {
        let field = create_test_field(Uuid::new_v4());
        let crop = create_test_crop("Corn");
        let created = create_test_period(field.id, crop.id);

        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field.clone()]])
                .into_connection(),
        );
        let crop_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[crop.clone()]])
                .into_connection(),
        );

        let service = create_test_service(period_db, field_db, crop_db, empty_mock());

        let result = service
            .create(CreateGrowingCropPeriodInput {
                field_id: field.id,
                crop_id: crop.id,
            })
            .await
            .unwrap();

        assert_eq!(result.field_id, field.id);
        assert_eq!(result.crop_id, crop.id);
    }

    #[tokio::test]
    async fn test_soft_delete_with_processings_is_rejected() {
        let period = create_test_period(Uuid::new_v4(), Uuid::new_v4());
        let processing = processing::Model {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            growing_crop_period_id: period.id,
            processing_type_id: Uuid::new_v4(),
            machine_id: Uuid::new_v4(),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        };

        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[period]])
                .into_connection(),
        );
        let processing_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[processing]])
                .into_connection(),
        );

        let service = create_test_service(period_db, empty_mock(), empty_mock(), processing_db);

        let result = service.soft_delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
