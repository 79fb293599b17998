//! Machine service.

use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{machine, user::UserRole},
    repositories::{FarmRepository, MachineRepository, ProcessingRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Machine service for business logic.
#[derive(Clone)]
pub struct MachineService {
    machine_repo: MachineRepository,
    farm_repo: FarmRepository,
    processing_repo: ProcessingRepository,
}

/// Input for creating a machine.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMachineInput {
    #[validate(length(min = 1, max = 256))]
    pub brand: String,

    #[validate(length(min = 1, max = 256))]
    pub model: String,

    #[validate(length(min = 1, max = 64))]
    pub register_number: String,

    pub farm_id: Uuid,
}

/// Input for updating a machine. Only supplied fields are applied.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMachineInput {
    #[validate(length(min = 1, max = 256))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub model: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub register_number: Option<String>,

    /// Transferring the machine to another farm is blocked while
    /// processings reference it.
    pub farm_id: Option<Uuid>,
}

impl MachineService {
    /// Create a new machine service.
    #[must_use]
    pub const fn new(
        machine_repo: MachineRepository,
        farm_repo: FarmRepository,
        processing_repo: ProcessingRepository,
    ) -> Self {
        Self {
            machine_repo,
            farm_repo,
            processing_repo,
        }
    }

    /// Create a machine, restoring a soft-deleted row with the same
    /// register number.
    pub async fn create(&self, input: CreateMachineInput) -> AppResult<machine::Model> {
        input.validate()?;

        if let Some(existing) = self
            .machine_repo
            .find_by_register_number_with_deleted(&input.register_number)
            .await?
        {
            if existing.deleted_at.is_some() {
                return self.machine_repo.restore(existing).await;
            }
            return Err(AppError::Conflict(format!(
                "Machine with register number '{}' already exists",
                input.register_number
            )));
        }

        let farm = self
            .farm_repo
            .find_by_id(input.farm_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("No farm found with id {}", input.farm_id))
            })?;

        let model = machine::ActiveModel {
            id: Set(Uuid::new_v4()),
            brand: Set(input.brand),
            model: Set(input.model),
            register_number: Set(input.register_number),
            farm_id: Set(farm.id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.machine_repo.create(model).await
    }

    /// All active machines.
    pub async fn list(&self) -> AppResult<Vec<machine::Model>> {
        let machines = self.machine_repo.find_all().await?;
        if machines.is_empty() {
            return Err(AppError::NotFound("No machines found".to_string()));
        }
        Ok(machines)
    }

    /// Get an active machine by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<machine::Model> {
        self.machine_repo.get_by_id(id).await
    }

    /// Apply the supplied fields to a machine.
    ///
    /// A farm transfer is rejected while processings reference the
    /// machine; those rows record work done on the current farm.
    pub async fn update(&self, id: Uuid, input: UpdateMachineInput) -> AppResult<machine::Model> {
        input.validate()?;

        let machine = self.machine_repo.get_by_id(id).await?;

        if let Some(farm_id) = input.farm_id
            && farm_id != machine.farm_id
            && self
                .processing_repo
                .find_any_by_machine(machine.id)
                .await?
                .is_some()
        {
            return Err(AppError::BadRequest(
                "Machine has recorded processings and cannot be moved to another farm".to_string(),
            ));
        }

        let mut active: machine::ActiveModel = machine.into();

        if let Some(farm_id) = input.farm_id {
            let farm = self.farm_repo.find_by_id(farm_id).await?.ok_or_else(|| {
                AppError::BadRequest(format!("No farm found with id {farm_id}"))
            })?;
            active.farm_id = Set(farm.id);
        }

        if let Some(brand) = input.brand {
            active.brand = Set(brand);
        }
        if let Some(model) = input.model {
            active.model = Set(model);
        }
        if let Some(register_number) = input.register_number {
            active.register_number = Set(register_number);
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.machine_repo.update(active).await
    }

    /// Soft-delete a machine with no recorded processings.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<machine::Model> {
        let machine = self.machine_repo.get_by_id(id).await?;
        self.ensure_no_children(machine.id).await?;
        self.machine_repo.soft_delete(machine).await
    }

    /// Permanently remove a machine. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let machine = self
            .machine_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Machine with id {id} not found")))?;

        self.ensure_no_children(machine.id).await?;
        self.machine_repo.delete(machine).await
    }

    async fn ensure_no_children(&self, machine_id: Uuid) -> AppResult<()> {
        if self
            .processing_repo
            .find_any_by_machine(machine_id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Machine has recorded processings and cannot be deleted".to_string(),
            ));
        }
        Ok(())
    }
}
