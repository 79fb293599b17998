//! Processing repository.

use std::sync::Arc;

use crate::entities::{Processing, processing};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Processing repository for database operations.
#[derive(Clone)]
pub struct ProcessingRepository {
    db: Arc<DatabaseConnection>,
}

impl ProcessingRepository {
    /// Create a new processing repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active processing by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<processing::Model>> {
        Processing::find_by_id(id)
            .filter(processing::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active processing by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<processing::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Processing with id {id} not found")))
    }

    /// Find a processing by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<processing::Model>> {
        Processing::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active processings, by operation date.
    pub async fn find_all(&self) -> AppResult<Vec<processing::Model>> {
        Processing::find()
            .filter(processing::Column::DeletedAt.is_null())
            .order_by_asc(processing::Column::Date)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active processing on the period (dependent-child probe).
    pub async fn find_any_by_growing_crop_period(
        &self,
        growing_crop_period_id: Uuid,
    ) -> AppResult<Option<processing::Model>> {
        Processing::find()
            .filter(processing::Column::GrowingCropPeriodId.eq(growing_crop_period_id))
            .filter(processing::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active processing using the machine (dependent-child probe).
    pub async fn find_any_by_machine(
        &self,
        machine_id: Uuid,
    ) -> AppResult<Option<processing::Model>> {
        Processing::find()
            .filter(processing::Column::MachineId.eq(machine_id))
            .filter(processing::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active processing of the type (dependent-child probe).
    pub async fn find_any_by_processing_type(
        &self,
        processing_type_id: Uuid,
    ) -> AppResult<Option<processing::Model>> {
        Processing::find()
            .filter(processing::Column::ProcessingTypeId.eq(processing_type_id))
            .filter(processing::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new processing.
    pub async fn create(&self, model: processing::ActiveModel) -> AppResult<processing::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a processing.
    pub async fn update(&self, model: processing::ActiveModel) -> AppResult<processing::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark a processing as deleted, keeping the row.
    pub async fn soft_delete(&self, model: processing::Model) -> AppResult<processing::Model> {
        let mut active: processing::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Remove a processing row irreversibly.
    pub async fn delete(&self, model: processing::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
