//! Processing service.
//!
//! The one place with real cross-entity logic: a processing's machine must
//! belong to the same farm as the field underlying its growing-crop
//! period.

use chrono::NaiveDate;
use farmtrack_common::{AppError, AppResult};
use farmtrack_db::{
    entities::{field, growing_crop_period, machine, processing, user::UserRole},
    repositories::{
        FieldRepository, GrowingCropPeriodRepository, MachineRepository, ProcessingRepository,
        ProcessingTypeRepository,
    },
};
use sea_orm::Set;
use serde::Deserialize;
use uuid::Uuid;

/// Processing service for business logic.
#[derive(Clone)]
pub struct ProcessingService {
    processing_repo: ProcessingRepository,
    period_repo: GrowingCropPeriodRepository,
    field_repo: FieldRepository,
    type_repo: ProcessingTypeRepository,
    machine_repo: MachineRepository,
}

/// Input for creating a processing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessingInput {
    pub date: NaiveDate,
    pub growing_crop_period_id: Uuid,
    pub processing_type_id: Uuid,
    pub machine_id: Uuid,
}

/// Input for updating a processing. Only supplied fields are applied; the
/// machine/farm consistency check re-runs when the machine or period
/// changes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessingInput {
    pub date: Option<NaiveDate>,
    pub growing_crop_period_id: Option<Uuid>,
    pub processing_type_id: Option<Uuid>,
    pub machine_id: Option<Uuid>,
}

impl ProcessingService {
    /// Create a new processing service.
    #[must_use]
    pub const fn new(
        processing_repo: ProcessingRepository,
        period_repo: GrowingCropPeriodRepository,
        field_repo: FieldRepository,
        type_repo: ProcessingTypeRepository,
        machine_repo: MachineRepository,
    ) -> Self {
        Self {
            processing_repo,
            period_repo,
            field_repo,
            type_repo,
            machine_repo,
        }
    }

    /// Record a processing after verifying all referents and the
    /// machine/farm consistency rule.
    pub async fn create(&self, input: CreateProcessingInput) -> AppResult<processing::Model> {
        let (period, field) = self.resolve_period(input.growing_crop_period_id).await?;

        self.type_repo
            .find_by_id(input.processing_type_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "There is no processing type with id {}",
                    input.processing_type_id
                ))
            })?;

        let machine = self.resolve_machine(input.machine_id).await?;

        Self::check_same_farm(&machine, &field)?;

        let model = processing::ActiveModel {
            id: Set(Uuid::new_v4()),
            date: Set(input.date),
            growing_crop_period_id: Set(period.id),
            processing_type_id: Set(input.processing_type_id),
            machine_id: Set(machine.id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.processing_repo.create(model).await
    }

    /// All active processings.
    pub async fn list(&self) -> AppResult<Vec<processing::Model>> {
        let processings = self.processing_repo.find_all().await?;
        if processings.is_empty() {
            return Err(AppError::NotFound("No processings found".to_string()));
        }
        Ok(processings)
    }

    /// Get an active processing by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<processing::Model> {
        self.processing_repo.get_by_id(id).await
    }

    /// Apply the supplied fields to a processing.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProcessingInput,
    ) -> AppResult<processing::Model> {
        let processing = self.processing_repo.get_by_id(id).await?;
        let mut active: processing::ActiveModel = processing.clone().into();

        if let Some(date) = input.date {
            active.date = Set(date);
        }

        if let Some(type_id) = input.processing_type_id {
            self.type_repo.find_by_id(type_id).await?.ok_or_else(|| {
                AppError::BadRequest(format!("There is no processing type with id {type_id}"))
            })?;
            active.processing_type_id = Set(type_id);
        }

        // Re-validate the machine/farm pairing whenever either side of it
        // changes; the unchanged side is loaded from the current row.
        if input.growing_crop_period_id.is_some() || input.machine_id.is_some() {
            let period_id = input
                .growing_crop_period_id
                .unwrap_or(processing.growing_crop_period_id);
            let machine_id = input.machine_id.unwrap_or(processing.machine_id);

            let (period, field) = self.resolve_period(period_id).await?;
            let machine = self.resolve_machine(machine_id).await?;

            Self::check_same_farm(&machine, &field)?;

            active.growing_crop_period_id = Set(period.id);
            active.machine_id = Set(machine.id);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.processing_repo.update(active).await
    }

    /// Soft-delete a processing. Processings are leaf records; nothing
    /// depends on them.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<processing::Model> {
        let processing = self.processing_repo.get_by_id(id).await?;
        self.processing_repo.soft_delete(processing).await
    }

    /// Permanently remove a processing. OWNER only.
    pub async fn permanent_delete(&self, id: Uuid, role: UserRole) -> AppResult<()> {
        if role != UserRole::Owner {
            return Err(AppError::Forbidden(
                "Only owners may permanently delete records".to_string(),
            ));
        }

        let processing = self
            .processing_repo
            .find_by_id_with_deleted(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Processing with id {id} not found")))?;

        self.processing_repo.delete(processing).await
    }

    /// Resolve a period together with its field.
    async fn resolve_period(
        &self,
        period_id: Uuid,
    ) -> AppResult<(growing_crop_period::Model, field::Model)> {
        let period = self.period_repo.find_by_id(period_id).await?.ok_or_else(|| {
            AppError::BadRequest(format!(
                "There is no growing crop period with id {period_id}"
            ))
        })?;

        let field = self
            .field_repo
            .find_by_id(period.field_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "There is no field underlying growing crop period {period_id}"
                ))
            })?;

        Ok((period, field))
    }

    async fn resolve_machine(&self, machine_id: Uuid) -> AppResult<machine::Model> {
        self.machine_repo
            .find_by_id(machine_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("There is no machine with id {machine_id}"))
            })
    }

    fn check_same_farm(machine: &machine::Model, field: &field::Model) -> AppResult<()> {
        if machine.farm_id != field.farm_id {
            return Err(AppError::BadRequest(format!(
                "Machine with id {} is not in this farm",
                machine.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use farmtrack_db::entities::{GeoPolygon, processing_type};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_field(farm_id: Uuid) -> field::Model {
        field::Model {
            id: Uuid::new_v4(),
            name: "North 40".to_string(),
            boundary: GeoPolygon {
                kind: "Polygon".into(),
                coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
            },
            farm_id,
            soil_id: Uuid::new_v4(),
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

    fn create_test_type(name: &str) -> processing_type::Model {
        processing_type::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn create_test_machine(farm_id: Uuid) -> machine::Model {
        machine::Model {
            id: Uuid::new_v4(),
            brand: "John Deere".to_string(),
            model: "8R 370".to_string(),
            register_number: "CB1234XX".to_string(),
            farm_id,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn create_test_processing(
        period_id: Uuid,
        type_id: Uuid,
        machine_id: Uuid,
    ) -> processing::Model {
        processing::Model {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            growing_crop_period_id: period_id,
            processing_type_id: type_id,
            machine_id,
            created_at: Utc::now().into(),
            updated_at: None,
            deleted_at: None,
        }
    }

    fn empty_mock() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn create_test_service(
        processing_db: Arc<DatabaseConnection>,
        period_db: Arc<DatabaseConnection>,
        field_db: Arc<DatabaseConnection>,
        type_db: Arc<DatabaseConnection>,
        machine_db: Arc<DatabaseConnection>,
    ) -> ProcessingService {
        ProcessingService::new(
            ProcessingRepository::new(processing_db),
            GrowingCropPeriodRepository::new(period_db),
            FieldRepository::new(field_db),
            ProcessingTypeRepository::new(type_db),
            MachineRepository::new(machine_db),
        )
    }

    #[tokio::test]
    async fn test_create_with_machine_from_same_farm_succeeds() {
        let farm_id = Uuid::new_v4();
        let field = create_test_field(farm_id);
        let period = create_test_period(field.id);
        let processing_type = create_test_type("Spraying");
        let machine = create_test_machine(farm_id);
        let created = create_test_processing(period.id, processing_type.id, machine.id);

        let processing_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[period.clone()]])
                .into_connection(),
        );
        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field]])
                .into_connection(),
        );
        let type_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[processing_type.clone()]])
                .into_connection(),
        );
        let machine_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[machine.clone()]])
                .into_connection(),
        );

        let service =
            create_test_service(processing_db, period_db, field_db, type_db, machine_db);

        let result = service
            .create(CreateProcessingInput {
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                growing_crop_period_id: period.id,
                processing_type_id: processing_type.id,
                machine_id: machine.id,
            })
            .await
            .unwrap();

        assert_eq!(result.machine_id, machine.id);
    }

    #[tokio::test]
    async fn test_create_with_machine_from_other_farm_is_rejected() {
        let field = create_test_field(Uuid::new_v4());
        let period = create_test_period(field.id);
        let processing_type = create_test_type("Spraying");
        // Machine belongs to a different farm
        let machine = create_test_machine(Uuid::new_v4());

        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[period.clone()]])
                .into_connection(),
        );
        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field]])
                .into_connection(),
        );
        let type_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[processing_type.clone()]])
                .into_connection(),
        );
        let machine_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[machine.clone()]])
                .into_connection(),
        );

        let service =
            create_test_service(empty_mock(), period_db, field_db, type_db, machine_db);

        let result = service
            .create(CreateProcessingInput {
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                growing_crop_period_id: period.id,
                processing_type_id: processing_type.id,
                machine_id: machine.id,
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_with_missing_period_is_rejected() {
        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<growing_crop_period::Model>::new()])
                .into_connection(),
        );

        let service = create_test_service(
            empty_mock(),
            period_db,
            empty_mock(),
            empty_mock(),
            empty_mock(),
        );

        let result = service
            .create(CreateProcessingInput {
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                growing_crop_period_id: Uuid::new_v4(),
                processing_type_id: Uuid::new_v4(),
                machine_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_machine_recheck_rejects_cross_farm() {
        let farm_id = Uuid::new_v4();
        let field = create_test_field(farm_id);
        let period = create_test_period(field.id);
        let current_machine_id = Uuid::new_v4();
        let existing = create_test_processing(period.id, Uuid::new_v4(), current_machine_id);

        // The replacement machine belongs to a different farm
        let other_machine = create_test_machine(Uuid::new_v4());

        let processing_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let period_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[period]])
                .into_connection(),
        );
        let field_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[field]])
                .into_connection(),
        );
        let machine_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[other_machine.clone()]])
                .into_connection(),
        );

        let service = create_test_service(
            processing_db,
            period_db,
            field_db,
            empty_mock(),
            machine_db,
        );

        let result = service
            .update(
                Uuid::new_v4(),
                UpdateProcessingInput {
                    date: None,
                    growing_crop_period_id: None,
                    processing_type_id: None,
                    machine_id: Some(other_machine.id),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_date_only_skips_consistency_check() {
        let existing = create_test_processing(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let mut updated = existing.clone();
        updated.date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        updated.updated_at = Some(Utc::now().into());

        let processing_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![existing], vec![updated]])
                .into_connection(),
        );

        let service = create_test_service(
            processing_db,
            empty_mock(),
            empty_mock(),
            empty_mock(),
            empty_mock(),
        );

        let result = service
            .update(
                Uuid::new_v4(),
                UpdateProcessingInput {
                    date: Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
                    growing_crop_period_id: None,
                    processing_type_id: None,
                    machine_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }
}
