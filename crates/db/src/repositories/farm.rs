//! Farm repository.

use std::sync::Arc;

use crate::entities::{Farm, farm};
use farmtrack_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

/// Farm repository for database operations.
#[derive(Clone)]
pub struct FarmRepository {
    db: Arc<DatabaseConnection>,
}

impl FarmRepository {
    /// Create a new farm repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an active farm by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<farm::Model>> {
        Farm::find_by_id(id)
            .filter(farm::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an active farm by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<farm::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Farm with id {id} not found")))
    }

    /// Find a farm by ID, including soft-deleted rows.
    pub async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<farm::Model>> {
        Farm::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a farm by name, including soft-deleted rows.
    ///
    /// Used by the restore-on-recreate rule: a colliding soft-deleted row
    /// is resurrected instead of a new row being inserted.
    pub async fn find_by_name_with_deleted(&self, name: &str) -> AppResult<Option<farm::Model>> {
        Farm::find()
            .filter(farm::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All active farms, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<farm::Model>> {
        Farm::find()
            .filter(farm::Column::DeletedAt.is_null())
            .order_by_asc(farm::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new farm.
    pub async fn create(&self, model: farm::ActiveModel) -> AppResult<farm::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a farm.
    pub async fn update(&self, model: farm::ActiveModel) -> AppResult<farm::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Clear the deletion marker on a soft-deleted farm.
    pub async fn restore(&self, model: farm::Model) -> AppResult<farm::Model> {
        let mut active: farm::ActiveModel = model.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Mark a farm as deleted, keeping the row.
    pub async fn soft_delete(&self, model: farm::Model) -> AppResult<farm::Model> {
        let mut active: farm::ActiveModel = model.into();
        active.deleted_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }

    /// Remove a farm row irreversibly.
    pub async fn delete(&self, model: farm::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::GeoPoint;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_farm(name: &str) -> farm::Model {
        farm::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: GeoPoint::new(23.3219, 42.6977),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let farm = create_test_farm("Green Acres");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[farm.clone()]])
                .into_connection(),
        );

        let repo = FarmRepository::new(db);
        let result = repo.find_by_id(farm.id).await.unwrap();

        assert_eq!(result.unwrap().name, "Green Acres");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<farm::Model>::new()])
                .into_connection(),
        );

        let repo = FarmRepository::new(db);
        let result = repo.get_by_id(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_name_with_deleted_returns_soft_deleted_row() {
        let mut farm = create_test_farm("Old Farm");
        farm.deleted_at = Some(Utc::now().into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[farm.clone()]])
                .into_connection(),
        );

        let repo = FarmRepository::new(db);
        let result = repo.find_by_name_with_deleted("Old Farm").await.unwrap();

        assert!(result.unwrap().deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_create_farm() {
        let farm = create_test_farm("New Farm");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[farm.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = FarmRepository::new(db);

        let active = farm::ActiveModel {
            id: Set(farm.id),
            name: Set(farm.name.clone()),
            location: Set(farm.location.clone()),
            created_at: Set(farm.created_at),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.name, "New Farm");
    }

    #[tokio::test]
    async fn test_restore_clears_deleted_at() {
        let mut deleted = create_test_farm("Back Again");
        deleted.deleted_at = Some(Utc::now().into());

        let mut restored = deleted.clone();
        restored.deleted_at = None;
        restored.updated_at = Some(Utc::now().into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[restored]])
                .into_connection(),
        );

        let repo = FarmRepository::new(db);
        let result = repo.restore(deleted).await.unwrap();

        assert!(result.deleted_at.is_none());
        assert!(result.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_soft_delete_sets_deleted_at() {
        let farm = create_test_farm("Going Away");

        let mut soft_deleted = farm.clone();
        soft_deleted.deleted_at = Some(Utc::now().into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[soft_deleted]])
                .into_connection(),
        );

        let repo = FarmRepository::new(db);
        let result = repo.soft_delete(farm).await.unwrap();

        assert!(result.deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let farm = create_test_farm("Gone");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = FarmRepository::new(db);
        repo.delete(farm).await.unwrap();
    }
}
