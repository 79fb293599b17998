//! Crop service.

use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{crop, user::UserRole},
    repositories::{CropRepository, GrowingCropPeriodRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Crop service for business logic.
#[derive(Clone)]
pub struct CropService {
    crop_repo: CropRepository,
    period_repo: GrowingCropPeriodRepository,
}

/// Input for creating a crop.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCropInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

/// Input for updating a crop.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCropInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
}

impl CropService {
    /// Create a new crop service.
    #[must_use]
    pub const fn new(crop_repo: CropRepository, period_repo: GrowingCropPeriodRepository) -> Self {
        Self {
            crop_repo,
            period_repo,
        }
    }

    /// Create a crop, restoring a soft-deleted row with the same name.
    pub async fn create(&self, input: CreateCropInput) -> AppResult<crop::Model> {
        input.validate()?;

        if let Some(existing) = self.crop_repo.find_by_name_with_deleted(&input.name).await? {
            if existing.deleted_at.is_some() {
                return self.crop_repo.restore(existing).await;
            }
            return Err(AppError::Conflict(format!(
                "Crop with name '{}' already exists",
                input.name
            )));
        }

        let model = crop::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.crop_repo.create(model).await
    }

    /// All active crops.
    pub async fn list(&self) -> AppResult<Vec<crop::Model>> {
        let crops = self.crop_repo.find_all().await?;
        if crops.is_empty() {
            return Err(AppError::NotFound("No crops found".to_string()));
        }
        Ok(crops)
    }

    /// Get an active crop by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<crop::Model> {
        self.crop_repo.get_by_id(id).await
    }

    /// Apply the supplied fields to a crop.
    pub async fn update(&self, id: Uuid, input: UpdateCropInput) -> AppResult<crop::Model> {
        input.validate()?;

        let crop = self.crop_repo.get_by_id(id).await?;
        let mut active: crop::ActiveModel = crop.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.crop_repo.update(active).await
    }

    /// Soft-delete a crop with no growing-crop periods.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<crop::Model> {
        let crop = self.crop_repo.get_by_id(id).await?;
        self.ensure_no_children(crop.id).await?;
        self.crop_repo.soft_delete(crop).await
    }

    /// Permanently remove a crop. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let crop = self
            .crop_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Crop with id {id} not found")))?;

        self.ensure_no_children(crop.id).await?;
        self.crop_repo.delete(crop).await
    }

    async fn ensure_no_children(&self, crop_id: Uuid) -> AppResult<()> {
        if self.period_repo.find_any_by_crop(crop_id).await?.is_some() {
            return Err(AppError::BadRequest(
                "Crop has associated growing crop periods and cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use farmtrack_db::entities::growing_crop_period;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn create_test_crop(name: &str) -> crop::Model {
        crop::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn empty_mock() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[tokio::test]
    async fn test_create_conflicts_with_active_crop() {
        let existing = create_test_crop("Corn");

        let crop_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = CropService::new(
            CropRepository::new(crop_db),
            GrowingCropPeriodRepository::new(empty_mock()),
        );

        let result = service
            .create(CreateCropInput {
                name: "Corn".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_soft_delete_with_periods_is_rejected() {
        let crop = create_test_crop("Corn");
        let period = growing_crop_period::Model {
            id: Uuid::new_v4(),
            field_id: Uuid::new_v4(),
            crop_id: crop.id,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        };

        let crop_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[crop.clone()]])
                .into_connection(),
        );
        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[period]])
                .into_connection(),
        );

        let service = CropService::new(
            CropRepository::new(crop_db),
            GrowingCropPeriodRepository::new(period_db),
        );

        let result = service.soft_delete(crop.id).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
