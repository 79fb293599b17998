//! Crop repository.

use std::sync::Arc;

use crate::entities::{Crop, crop};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Crop repository for database operations.
#[derive(Clone)]
pub struct CropRepository {
    db: Arc<DatabaseConnection>,
}

impl CropRepository {
    /// Create a new crop repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active crop by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<crop::Model>> {
        Crop::find_by_id(id)
            .filter(crop::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active crop by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<crop::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Crop with id {id} not found")))
    }

    /// Find a crop by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<crop::Model>> {
        Crop::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a crop by name, including soft-deleted rows.
    pub async fn find_by_name_with_deleted(&self, name: &str) -> AppResult<Option<crop::Model>> {
        Crop::find()
            .filter(crop::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active crops, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<crop::Model>> {
        Crop::find()
            .filter(crop::Column::DeletedAt.is_null())
            .order_by_asc(crop::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new crop.
    pub async fn create(&self, model: crop::ActiveModel) -> AppResult<crop::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a crop.
    pub async fn update(&self, model: crop::ActiveModel) -> AppResult<crop::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Clear the deletion marker on a soft-deleted crop.
    pub async fn restore(&self, model: crop::Model) -> AppResult<crop::Model> {
        let mut active: crop::ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Mark a crop as deleted, keeping the row.
    pub async fn soft_delete(&self, model: crop::Model) -> AppResult<crop::Model> {
        let mut active: crop::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Remove a crop row irreversibly.
    pub async fn delete(&self, model: crop::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
