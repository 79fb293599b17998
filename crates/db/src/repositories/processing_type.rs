//! Processing-type repository.

use std::sync::Arc;

use crate::entities::{ProcessingType, processing_type};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Processing-type repository for database operations.
#[derive(Clone)]
pub struct ProcessingTypeRepository {
    db: Arc<DatabaseConnection>,
}

impl ProcessingTypeRepository {
    /// Create a new processing-type repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active processing type by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<processing_type::Model>> {
        ProcessingType::find_by_id(id)
            .filter(processing_type::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active processing type by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<processing_type::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Processing type with id {id} not found")))
    }

    /// Find a processing type by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(
        &self,
        id: Uuid,
    ) -> AppResult<Option<processing_type::Model>> {
        ProcessingType::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a processing type by name, including soft-deleted rows.
    pub async fn find_by_name_with_deleted(
        &self,
        name: &str,
    ) -> AppResult<Option<processing_type::Model>> {
        ProcessingType::find()
            .filter(processing_type::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active processing types, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<processing_type::Model>> {
        ProcessingType::find()
            .filter(processing_type::Column::DeletedAt.is_null())
            .order_by_asc(processing_type::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new processing type.
    pub async fn create(
        &self,
        model: processing_type::ActiveModel,
    ) -> AppResult<processing_type::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a processing type.
    pub async fn update(
        &self,
        model: processing_type::ActiveModel,
    ) -> AppResult<processing_type::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Clear the deletion marker on a soft-deleted processing type.
    pub async fn restore(&self, model: processing_type::Model) -> AppResult<processing_type::Model> {
        let mut active: processing_type::ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Mark a processing type as deleted, keeping the row.
    pub async fn soft_delete(
        &self,
        model: processing_type::Model,
    ) -> AppResult<processing_type::Model> {
        let mut active: processing_type::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Remove a processing-type row irreversibly.
    pub async fn delete(&self, model: processing_type::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
