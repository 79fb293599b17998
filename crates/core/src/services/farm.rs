//! Farm service.

use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{GeoPoint, farm, user::UserRole},
    repositories::{FarmRepository, FieldRepository, MachineRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Farm service for business logic.
#[derive(Clone)]
pub struct FarmService {
    farm_repo: FarmRepository,
    field_repo: FieldRepository,
    machine_repo: MachineRepository,
}

/// Input for creating a farm.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFarmInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(custom(function = "validate_location"))]
    pub location: GeoPoint,
}

/// Input for updating a farm. Only supplied fields are applied.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFarmInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_location"))]
    pub location: Option<GeoPoint>,
}

fn validate_location(location: &GeoPoint) -> Result<(), ValidationError> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_coordinates"))
    }
}

impl FarmService {
    /// Create a new farm service.
    #[must_use]
    pub const fn new(
        farm_repo: FarmRepository,
        field_repo: FieldRepository,
        machine_repo: MachineRepository,
    ) -> Self {
        Self {
            farm_repo,
            field_repo,
            machine_repo,
        }
    }

    /// Create a farm, restoring a soft-deleted row with the same name.
    pub async fn create(&self, input: CreateFarmInput) -> AppResult<farm::Model> {
        input.validate()?;

        if let Some(existing) = self.farm_repo.find_by_name_with_deleted(&input.name).await? {
            if existing.deleted_at.is_some() {
                return self.farm_repo.restore(existing).await;
            }
            return Err(AppError::Conflict(format!(
                "Farm with name '{}' already exists",
                input.name
            )));
        }

        let model = farm::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            location: Set(input.location),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.farm_repo.create(model).await
    }

    /// All active farms.
    pub async fn list(&self) -> AppResult<Vec<farm::Model>> {
        let farms = self.farm_repo.find_all().await?;
        if farms.is_empty() {
            return Err(AppError::NotFound("No farms found".to_string()));
        }
        Ok(farms)
    }

    /// Get an active farm by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<farm::Model> {
        self.farm_repo.get_by_id(id).await
    }

    /// Apply the supplied fields to a farm.
    pub async fn update(&self, id: Uuid, input: UpdateFarmInput) -> AppResult<farm::Model> {
        input.validate()?;

        let farm = self.farm_repo.get_by_id(id).await?;
        let mut active: farm::ActiveModel = farm.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(location) = input.location {
            active.location = Set(location);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.farm_repo.update(active).await
    }

    /// Soft-delete a farm with no dependent fields or machines.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<farm::Model> {
        let farm = self.farm_repo.get_by_id(id).await?;
        self.ensure_no_children(farm.id).await?;
        self.farm_repo.soft_delete(farm).await
    }

    /// Permanently remove a farm. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let farm = self
            .farm_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Farm with id {id} not found")))?;

        self.ensure_no_children(farm.id).await?;
        self.farm_repo.delete(farm).await
    }

    async fn ensure_no_children(&self, farm_id: Uuid) -> AppResult<()> {
        if self.field_repo.find_any_by_farm(farm_id).await?.is_some() {
            return Err(AppError::BadRequest(
                "Farm has associated fields and cannot be deleted".to_string(),
            ));
        }
        if self.machine_repo.find_any_by_farm(farm_id).await?.is_some() {
            return Err(AppError::BadRequest(
                "Farm has associated machines and cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }
}
