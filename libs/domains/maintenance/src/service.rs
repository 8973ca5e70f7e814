use std::sync::Arc;
use validator::Validate;

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::models::{CreateMaintenance, Maintenance, MaintenanceFilter, UpdateMaintenance};
use crate::repository::MaintenanceRepository;

/// Service layer for maintenance scheduling
#[derive(Clone)]
pub struct MaintenanceService<R: MaintenanceRepository> {
    repository: Arc<R>,
}

impl<R: MaintenanceRepository> MaintenanceService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_maintenance(
        &self,
        filter: MaintenanceFilter,
    ) -> MaintenanceResult<Vec<Maintenance>> {
        self.repository.list(filter).await
    }

    /// Schedule maintenance; new orders always start as `programado`
    pub async fn schedule_maintenance(&self, input: CreateMaintenance) -> MaintenanceResult<i32> {
        input
            .validate()
            .map_err(|e| MaintenanceError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn update_maintenance(
        &self,
        id: i32,
        input: UpdateMaintenance,
    ) -> MaintenanceResult<()> {
        if input.is_empty() {
            return Err(MaintenanceError::NothingToUpdate);
        }
        input
            .validate()
            .map_err(|e| MaintenanceError::Validation(e.to_string()))?;

        if self.repository.update(id, input).await? {
            Ok(())
        } else {
            Err(MaintenanceError::NotFound(id))
        }
    }
}
