//! Field service.

use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{GeoPolygon, field, user::UserRole},
    repositories::{FarmRepository, FieldRepository, GrowingCropPeriodRepository, SoilRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Field service for business logic.
#[derive(Clone)]
pub struct FieldService {
    field_repo: FieldRepository,
    farm_repo: FarmRepository,
    soil_repo: SoilRepository,
    period_repo: GrowingCropPeriodRepository,
}

/// Input for creating a field.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(custom(function = "validate_boundary"))]
    pub boundary: GeoPolygon,

    pub farm_id: Uuid,

    pub soil_id: Uuid,
}

/// Input for updating a field. Only supplied fields are applied.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_boundary"))]
    pub boundary: Option<GeoPolygon>,

    /// Moving the field to another farm is blocked while growing-crop
    /// periods exist.
    pub farm_id: Option<Uuid>,

    pub soil_id: Option<Uuid>,
}

fn validate_boundary(boundary: &GeoPolygon) -> Result<(), ValidationError> {
    if boundary.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_boundary"))
    }
}

impl FieldService {
    /// Create a new field service.
    #[must_use]
    pub const fn new(
        field_repo: FieldRepository,
        farm_repo: FarmRepository,
        soil_repo: SoilRepository,
        period_repo: GrowingCropPeriodRepository,
    ) -> Self {
        Self {
            field_repo,
            farm_repo,
            soil_repo,
            period_repo,
        }
    }

    /// Create a field, restoring a soft-deleted row with the same name in
    /// the same farm.
    pub async fn create(&self, input: CreateFieldInput) -> AppResult<field::Model> {
        input.validate()?;

        if let Some(existing) = self
            .field_repo
            .find_by_name_in_farm_with_deleted(input.farm_id, &input.name)
            .await?
        {
            if existing.deleted_at.is_some() {
                return self.field_repo.restore(existing).await;
            }

            let farm_name = self
                .farm_repo
                .find_by_id(input.farm_id)
                .await?
                .map_or_else(|| "unknown farm".to_string(), |farm| farm.name);
            return Err(AppError::Conflict(format!(
                "Field with name '{}' already exists in farm '{farm_name}'",
                input.name
            )));
        }

        let soil = self
            .soil_repo
            .find_by_id(input.soil_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("No soil found with id {}", input.soil_id))
            })?;

        let farm = self
            .farm_repo
            .find_by_id(input.farm_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("No farm found with id {}", input.farm_id))
            })?;

        let model = field::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            boundary: Set(input.boundary),
            farm_id: Set(farm.id),
            soil_id: Set(soil.id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.field_repo.create(model).await
    }

    /// All active fields.
    pub async fn list(&self) -> AppResult<Vec<field::Model>> {
        let fields = self.field_repo.find_all().await?;
        if fields.is_empty() {
            return Err(AppError::NotFound("No fields found".to_string()));
        }
        Ok(fields)
    }

    /// Get an active field by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<field::Model> {
        self.field_repo.get_by_id(id).await
    }

    /// Apply the supplied fields to a field record.
    ///
    /// Reparenting to another farm is rejected while growing-crop periods
    /// exist; the periods record history on the current farm's field.
    pub async fn update(&self, id: Uuid, input: UpdateFieldInput) -> AppResult<field::Model> {
        input.validate()?;

        let field = self.field_repo.get_by_id(id).await?;

        if let Some(farm_id) = input.farm_id
            && farm_id != field.farm_id
            && self
                .period_repo
                .find_any_by_field(field.id)
                .await?
                .is_some()
        {
            return Err(AppError::BadRequest(
                "Field has growing crop periods and cannot be moved to another farm".to_string(),
            ));
        }

        let mut active: field::ActiveModel = field.into();

        if let Some(farm_id) = input.farm_id {
            let farm = self.farm_repo.find_by_id(farm_id).await?.ok_or_else(|| {
                AppError::BadRequest(format!("No farm found with id {farm_id}"))
            })?;
            active.farm_id = Set(farm.id);
        }

        if let Some(soil_id) = input.soil_id {
            let soil = self.soil_repo.find_by_id(soil_id).await?.ok_or_else(|| {
                AppError::BadRequest(format!("No soil found with id {soil_id}"))
            })?;
            active.soil_id = Set(soil.id);
        }

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(boundary) = input.boundary {
            active.boundary = Set(boundary);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.field_repo.update(active).await
    }

    /// Soft-delete a field with no growing-crop periods.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<field::Model> {
        let field = self.field_repo.get_by_id(id).await?;
        self.ensure_no_children(field.id).await?;
        self.field_repo.soft_delete(field).await
    }

    /// Permanently remove a field. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let field = self
            .field_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Field with id {id} not found")))?;

        self.ensure_no_children(field.id).await?;
        self.field_repo.delete(field).await
    }

    async fn ensure_no_children(&self, field_id: Uuid) -> AppResult<()> {
        if self
            .period_repo
            .find_any_by_field(field_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Field has associated growing crop periods and cannot be deleted".to_string(),
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
    use farmtrack_db::entities::{GeoPoint, farm, growing_crop_period, soil};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_boundary() -> GeoPolygon {
        GeoPolygon {
            kind: "Polygon".into(),
            coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
        }
    }

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

    fn create_test_soil(name: &str) -> soil::Model {
        soil::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn create_test_field(name: &str, farm_id: Uuid, soil_id: Uuid) -> field::Model {
        field::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            boundary: test_boundary(),
            farm_id,
            soil_id,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn create_test_period(field_id: Uuid) -> growing_crop_period::Model {
        growing_crop_period::Model {
            id: Uuid::new_v4(),
            field_id,
            crop_id: Uuid::new_v4(),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn empty_mock() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn create_test_service(
        field_db: Arc<DatabaseConnection>,
        farm_db: Arc<DatabaseConnection>,
        soil_db: Arc<DatabaseConnection>,
        period_db: Arc<DatabaseConnection>,
    ) -> FieldService {
        FieldService::new(
            FieldRepository::new(field_db),
            FarmRepository::new(farm_db),
            SoilRepository::new(soil_db),
            GrowingCropPeriodRepository::new(period_db),
        )
    }

    #[tokio::test]
    async fn test_create_with_unknown_soil_is_rejected() {
        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<field::Model>::new()])
                .into_connection(),
        );
        let soil_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<soil::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(field_db, empty_mock(), soil_db, empty_mock());

        let result = service
            .create(CreateFieldInput {
                name: "North 40".to_string(),
                boundary: test_boundary(),
                farm_id: Uuid::new_v4(),
                soil_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_succeeds_with_valid_parents() {
        let farm = create_test_farm("Green Acres");
        let soil = create_test_soil("Chernozem");
        let created = create_test_field("North 40", farm.id, soil.id);

        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<field::Model>::new(), vec![created.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let farm_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[farm.clone()]])
                .into_connection(),
        );
        let soil_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[soil]])
                .into_connection(),
        );

        let service = create_test_service(field_db, farm_db, soil_db, empty_mock());

        let result = service
            .create(CreateFieldInput {
                name: "North 40".to_string(),
                boundary: test_boundary(),
                farm_id: farm.id,
                soil_id: created.soil_id,
            })
            .await
            .unwrap();

        assert_eq!(result.name, "North 40");
    }

    #[tokio::test]
    async fn test_create_restores_soft_deleted_field() {
        let farm_id = Uuid::new_v4();
        let mut deleted = create_test_field("North 40", farm_id, Uuid::new_v4());
        deleted.deleted_at = Some(Utc::now().into());
        let deleted_id = deleted.id;

        let mut restored = deleted.clone();
        restored.deleted_at = None;
        restored.updated_at = Some(Utc::now().into());

        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![deleted], vec![restored]])
                .into_connection(),
        );

        let service = create_test_service(field_db, empty_mock(), empty_mock(), empty_mock());

        let result = service
            .create(CreateFieldInput {
                name: "North 40".to_string(),
                boundary: test_boundary(),
                farm_id,
                soil_id: Uuid::new_v4(),
            })
            .await
            .unwrap();

        assert_eq!(result.id, deleted_id);
        assert!(result.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_update_reparent_blocked_by_periods() {
        let field = create_test_field("North 40", Uuid::new_v4(), Uuid::new_v4());
        let period = create_test_period(field.id);

        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field]])
                .into_connection(),
        );
        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[period]])
                .into_connection(),
        );

        let service = create_test_service(field_db, empty_mock(), empty_mock(), period_db);

        let result = service
            .update(
                Uuid::new_v4(),
                UpdateFieldInput {
                    name: None,
                    boundary: None,
                    farm_id: Some(Uuid::new_v4()),
                    soil_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_soft_delete_with_periods_is_rejected() {
        let field = create_test_field("North 40", Uuid::new_v4(), Uuid::new_v4());
        let period = create_test_period(field.id);

        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field]])
                .into_connection(),
        );
        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[period]])
                .into_connection(),
        );

        let service = create_test_service(field_db, empty_mock(), empty_mock(), period_db);

        let result = service.soft_delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
