//! Growing-crop-period repository.

use std::sync::Arc;

use crate::entities::{GrowingCropPeriod, growing_crop_period};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Growing-crop-period repository for database operations.
#[derive(Clone)]
pub struct GrowingCropPeriodRepository {
    db: Arc<DatabaseConnection>,
}

impl GrowingCropPeriodRepository {
    /// Create a new growing-crop-period repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active period by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<growing_crop_period::Model>> {
        GrowingCropPeriod::find_by_id(id)
            .filter(growing_crop_period::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active period by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<growing_crop_period::Model> {
        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Growing crop period with id {id} not found"))
        })
    }

    /// Find a period by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(
        &self,
        id: Uuid,
    ) -> AppResult<Option<growing_crop_period::Model>> {
        GrowingCropPeriod::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active periods, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<growing_crop_period::Model>> {
        GrowingCropPeriod::find()
            .filter(growing_crop_period::Column::DeletedAt.is_null())
            .order_by_asc(growing_crop_period::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active period on the field (dependent-child probe).
    pub async fn find_any_by_field(
        &self,
        field_id: Uuid,
    ) -> AppResult<Option<growing_crop_period::Model>> {
        GrowingCropPeriod::find()
            .filter(growing_crop_period::Column::FieldId.eq(field_id))
            .filter(growing_crop_period::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active period growing the crop (dependent-child probe).
    pub async fn find_any_by_crop(
        &self,
        crop_id: Uuid,
    ) -> AppResult<Option<growing_crop_period::Model>> {
        GrowingCropPeriod::find()
            .filter(growing_crop_period::Column::CropId.eq(crop_id))
            .filter(growing_crop_period::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new period.
    pub async fn create(
        &self,
        model: growing_crop_period::ActiveModel,
    ) -> AppResult<growing_crop_period::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark a period as deleted, keeping the row.
    pub async fn soft_delete(
        &self,
        model: growing_crop_period::Model,
    ) -> AppResult<growing_crop_period::Model> {
        let mut active: growing_crop_period::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a period row irreversibly.
    pub async fn delete(&self, model: growing_crop_period::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
