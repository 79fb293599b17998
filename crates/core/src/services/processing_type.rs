//! Processing-type service.

use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{processing_type, user::UserRole},
    repositories::{ProcessingRepository, ProcessingTypeRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Processing-type service for business logic.
#[derive(Clone)]
pub struct ProcessingTypeService {
    type_repo: ProcessingTypeRepository,
    processing_repo: ProcessingRepository,
}

/// Input for creating a processing type.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessingTypeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

/// Input for updating a processing type.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessingTypeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
}

impl ProcessingTypeService {
    /// Create a new processing-type service.
    #[must_use]
    pub const fn new(
        type_repo: ProcessingTypeRepository,
        processing_repo: ProcessingRepository,
    ) -> Self {
        Self {
            type_repo,
            processing_repo,
        }
    }

    /// Create a processing type, restoring a soft-deleted row with the
    /// same name.
    pub async fn create(
        &self,
        input: CreateProcessingTypeInput,
    ) -> AppResult<processing_type::Model> {
        input.validate()?;

        if let Some(existing) = self.type_repo.find_by_name_with_deleted(&input.name).await? {
            if existing.deleted_at.is_some() {
                return self.type_repo.restore(existing).await;
            }
            return Err(AppError::Conflict(format!(
                "Processing type with name '{}' already exists",
                input.name
            )));
        }

        let model = processing_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.type_repo.create(model).await
    }

    /// All active processing types.
    pub async fn list(&self) -> AppResult<Vec<processing_type::Model>> {
        let types = self.type_repo.find_all().await?;
        if types.is_empty() {
            return Err(AppError::NotFound("No processing types found".to_string()));
        }
        Ok(types)
    }

    /// Get an active processing type by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<processing_type::Model> {
        self.type_repo.get_by_id(id).await
    }

    /// Apply the supplied fields to a processing type.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProcessingTypeInput,
    ) -> AppResult<processing_type::Model> {
        input.validate()?;

        let processing_type = self.type_repo.get_by_id(id).await?;
        let mut active: processing_type::ActiveModel = processing_type.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.type_repo.update(active).await
    }

    /// Soft-delete a processing type with no recorded processings.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<processing_type::Model> {
        let processing_type = self.type_repo.get_by_id(id).await?;
        self.ensure_no_children(processing_type.id).await?;
        self.type_repo.soft_delete(processing_type).await
    }

    /// Permanently remove a processing type. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let processing_type = self
            .type_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Processing type with id {id} not found"))
            })?;

        self.ensure_no_children(processing_type.id).await?;
        self.type_repo.delete(processing_type).await
    }

    async fn ensure_no_children(&self, type_id: Uuid) -> AppResult<()> {
        if self
            .processing_repo
            .find_any_by_processing_type(type_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Processing type is used by processings and cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }
}
