//! Soil repository.

use std::sync::Arc;

use crate::entities::{Soil, soil};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Soil repository for database operations.
#[derive(Clone)]
pub struct SoilRepository {
    db: Arc<DatabaseConnection>,
}

impl SoilRepository {
    /// Create a new soil repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active soil by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<soil::Model>> {
        Soil::find_by_id(id)
            .filter(soil::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active soil by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<soil::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Soil with id {id} not found")))
    }

    /// Find a soil by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<soil::Model>> {
        Soil::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a soil by name, including soft-deleted rows.
    pub async fn find_by_name_with_deleted(&self, name: &str) -> AppResult<Option<soil::Model>> {
        Soil::find()
            .filter(soil::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active soils, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<soil::Model>> {
        Soil::find()
            .filter(soil::Column::DeletedAt.is_null())
            .order_by_asc(soil::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new soil.
    pub async fn create(&self, model: soil::ActiveModel) -> AppResult<soil::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a soil.
    pub async fn update(&self, model: soil::ActiveModel) -> AppResult<soil::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Clear the deletion marker on a soft-deleted soil.
    pub async fn restore(&self, model: soil::Model) -> AppResult<soil::Model> {
        let mut active: soil::ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Mark a soil as deleted, keeping the row.
    pub async fn soft_delete(&self, model: soil::Model) -> AppResult<soil::Model> {
        let mut active: soil::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Remove a soil row irreversibly.
    pub async fn delete(&self, model: soil::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
