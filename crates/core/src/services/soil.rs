//! Soil service.

use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{soil, user::UserRole},
    repositories::{FieldRepository, SoilRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Soil service for business logic.
#[derive(Clone)]
pub struct SoilService {
    soil_repo: SoilRepository,
    field_repo: FieldRepository,
}

/// Input for creating a soil.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSoilInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

/// Input for updating a soil.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSoilInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
}

impl SoilService {
    /// Create a new soil service.
    #[must_use]
    pub const fn new(soil_repo: SoilRepository, field_repo: FieldRepository) -> Self {
        Self {
            soil_repo,
            field_repo,
        }
    }

    /// Create a soil, restoring a soft-deleted row with the same name.
    pub async fn create(&self, input: CreateSoilInput) -> AppResult<soil::Model> {
        input.validate()?;

        if let Some(existing) = self.soil_repo.find_by_name_with_deleted(&input.name).await? {
            if existing.deleted_at.is_some() {
                return self.soil_repo.restore(existing).await;
            }
            return Err(AppError::Conflict(format!(
                "Soil with name '{}' already exists",
                input.name
            )));
        }

        let model = soil::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.soil_repo.create(model).await
    }

    /// All active soils.
    pub async fn list(&self) -> AppResult<Vec<soil::Model>> {
        let soils = self.soil_repo.find_all().await?;
        if soils.is_empty() {
            return Err(AppError::NotFound("No soils found".to_string()));
        }
        Ok(soils)
    }

    /// Get an active soil by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<soil::Model> {
        self.soil_repo.get_by_id(id).await
    }

    /// Apply the supplied fields to a soil.
    pub async fn update(&self, id: Uuid, input: UpdateSoilInput) -> AppResult<soil::Model> {
        input.validate()?;

        let soil = self.soil_repo.get_by_id(id).await?;
        let mut active: soil::ActiveModel = soil.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.soil_repo.update(active).await
    }

    /// Soft-delete a soil not referenced by any field.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<soil::Model> {
        let soil = self.soil_repo.get_by_id(id).await?;
        self.ensure_no_children(soil.id).await?;
        self.soil_repo.soft_delete(soil).await
    }

    /// Permanently remove a soil. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let soil = self
            .soil_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Soil with id {id} not found")))?;

        self.ensure_no_children(soil.id).await?;
        self.soil_repo.delete(soil).await
    }

    async fn ensure_no_children(&self, soil_id: Uuid) -> AppResult<()> {
        if self.field_repo.find_any_by_soil(soil_id).await?.is_some() {
            return Err(AppError::BadRequest(
                "Soil is used by fields and cannot be deleted".to_string(),
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
    use farmtrack_db::entities::{GeoPolygon, field};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn create_test_soil(name: &str) -> soil::Model {
        soil::Model {
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
    async fn test_create_restores_soft_deleted_soil() {
        let mut deleted = create_test_soil("Chernozem");
        deleted.deleted_at = Some(Utc::now().into());
        let deleted_id = deleted.id;

        let mut restored = deleted.clone();
        restored.deleted_at = None;

        let soil_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![deleted], vec![restored]])
                .into_connection(),
        );

        let service = SoilService::new(
            SoilRepository::new(soil_db),
            FieldRepository::new(empty_mock()),
        );

        let result = service
            .create(CreateSoilInput {
                name: "Chernozem".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.id, deleted_id);
        assert!(result.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_soft_delete_with_fields_is_rejected() {
        let soil = create_test_soil("Chernozem");
        let field = field::Model {
            id: Uuid::new_v4(),
            name: "North 40".to_string(),
            boundary: GeoPolygon {
                kind: "Polygon".into(),
                coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
            },
            farm_id: Uuid::new_v4(),
            soil_id: soil.id,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        };

        let soil_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[soil]])
                .into_connection(),
        );
        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field]])
                .into_connection(),
        );

        let service = SoilService::new(SoilRepository::new(soil_db), FieldRepository::new(field_db));

        let result = service.soft_delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let service = SoilService::new(
            SoilRepository::new(empty_mock()),
            FieldRepository::new(empty_mock()),
        );

        let result = service
            .create(CreateSoilInput {
                name: String::new(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
