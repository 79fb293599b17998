//! Machine repository.

use std::sync::Arc;

use crate::entities::{Machine, machine};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Machine repository for database operations.
#[derive(Clone)]
pub struct MachineRepository {
    db: Arc<DatabaseConnection>,
}

impl MachineRepository {
    /// Create a new machine repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active machine by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<machine::Model>> {
        Machine::find_by_id(id)
            .filter(machine::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active machine by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<machine::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Machine with id {id} not found")))
    }

    /// Find a machine by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<machine::Model>> {
        Machine::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a machine by register number, including soft-deleted rows.
    pub async fn find_by_register_number_with_deleted(
        &self,
        register_number: &str,
    ) -> AppResult<Option<machine::Model>> {
        Machine::find()
            .filter(machine::Column::RegisterNumber.eq(register_number))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active machines, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<machine::Model>> {
        Machine::find()
            .filter(machine::Column::DeletedAt.is_null())
            .order_by_asc(machine::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Any active machine belonging to the farm (dependent-child probe).
    pub async fn find_any_by_farm(&self, farm_id: Uuid) -> AppResult<Option<machine::Model>> {
        Machine::find()
            .filter(machine::Column::FarmId.eq(farm_id))
            .filter(machine::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new machine.
    pub async fn create(&self, model: machine::ActiveModel) -> AppResult<machine::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a machine.
    pub async fn update(&self, model: machine::ActiveModel) -> AppResult<machine::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Clear the deletion marker on a soft-deleted machine.
    pub async fn restore(&self, model: machine::Model) -> AppResult<machine::Model> {
        let mut active: machine::ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Mark a machine as deleted, keeping the row.
    pub async fn soft_delete(&self, model: machine::Model) -> AppResult<machine::Model> {
        let mut active: machine::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Remove a machine row irreversibly.
    pub async fn delete(&self, model: machine::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
