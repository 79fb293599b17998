//! Field repository.

use std::sync::Arc;

use crate::entities::{Field, field};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Field repository for database operations.
#[derive(Clone)]
pub struct FieldRepository {
    db: Arc<DatabaseConnection>,
}

impl FieldRepository {
    /// Create a new field repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active field by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<field::Model>> {
        Field::find_by_id(id)
            .filter(field::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active field by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<field::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Field with id {id} not found")))
    }

    /// Find a field by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<field::Model>> {
        Field::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a field by name within a farm, including soft-deleted rows.
    ///
    /// Field names are unique per farm, not globally.
    pub async fn find_by_name_in_farm_with_deleted(
        &self,
        farm_id: Uuid,
        name: &str,
    ) -> AppResult<Option<field::Model>> {
        Field::find()
            .filter(field::Column::FarmId.eq(farm_id))
            .filter(field::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active fields, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<field::Model>> {
        Field::find()
            .filter(field::Column::DeletedAt.is_null())
            .order_by_asc(field::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active field belonging to the farm (dependent-child probe).
    pub async fn find_any_by_farm(&self, farm_id: Uuid) -> AppResult<Option<field::Model>> {
        Field::find()
            .filter(field::Column::FarmId.eq(farm_id))
            .filter(field::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active field using the soil (dependent-child probe).
    pub async fn find_any_by_soil(&self, soil_id: Uuid) -> AppResult<Option<field::Model>> {
        Field::find()
            .filter(field::Column::SoilId.eq(soil_id))
            .filter(field::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new field.
    pub async fn create(&self, model: field::ActiveModel) -> AppResult<field::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a field.
    pub async fn update(&self, model: field::ActiveModel) -> AppResult<field::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Clear the deletion marker on a soft-deleted field.
    pub async fn restore(&self, model: field::Model) -> AppResult<field::Model> {
        let mut active: field::ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Mark a field as deleted, keeping the row.
    pub async fn soft_delete(&self, model: field::Model) -> AppResult<field::Model> {
        let mut active: field::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Remove a field row irreversibly.
    pub async fn delete(&self, model: field::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
