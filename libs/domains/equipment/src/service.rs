use std::sync::Arc;
use validator::Validate;

use crate::error::{EquipmentError, EquipmentResult};
use crate::models::{
    Category, CreateEquipment, Equipment, EquipmentFilter, Location, UpdateEquipment,
};
use crate::repository::EquipmentRepository;

/// Service layer for equipment inventory business logic
#[derive(Clone)]
pub struct EquipmentService<R: EquipmentRepository> {
    repository: Arc<R>,
}

impl<R: EquipmentRepository> EquipmentService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List equipment with optional category/status filters
    pub async fn list_equipment(&self, filter: EquipmentFilter) -> EquipmentResult<Vec<Equipment>> {
        self.repository.list(filter).await
    }

    /// Get one piece of equipment
    pub async fn get_equipment(&self, id: i32) -> EquipmentResult<Equipment> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EquipmentError::NotFound(id))
    }

    /// Register new equipment, returning its id
    pub async fn create_equipment(&self, input: CreateEquipment) -> EquipmentResult<i32> {
        input
            .validate()
            .map_err(|e| EquipmentError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Partially update equipment
    pub async fn update_equipment(&self, id: i32, input: UpdateEquipment) -> EquipmentResult<()> {
        if input.is_empty() {
            return Err(EquipmentError::NothingToUpdate);
        }
        input
            .validate()
            .map_err(|e| EquipmentError::Validation(e.to_string()))?;

        if self.repository.update(id, input).await? {
            Ok(())
        } else {
            Err(EquipmentError::NotFound(id))
        }
    }

    pub async fn list_categories(&self) -> EquipmentResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    pub async fn list_locations(&self) -> EquipmentResult<Vec<Location>> {
        self.repository.list_locations().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationalStatus;
    use crate::repository::MockEquipmentRepository;
    use mockall::predicate;

    #[tokio::test]
    async fn test_get_missing_equipment_is_not_found() {
        let mut mock_repo = MockEquipmentRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(predicate::eq(99))
            .returning(|_| Ok(None));

        let service = EquipmentService::new(mock_repo);
        let err = service.get_equipment(99).await.unwrap_err();

        assert!(matches!(err, EquipmentError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_empty_update_never_reaches_repository() {
        let mut mock_repo = MockEquipmentRepository::new();
        mock_repo.expect_update().never();

        let service = EquipmentService::new(mock_repo);
        let err = service
            .update_equipment(1, UpdateEquipment::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EquipmentError::NothingToUpdate));
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_is_not_found() {
        let mut mock_repo = MockEquipmentRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, input| *id == 5 && input.estado_operativo == Some(OperationalStatus::Obsoleto))
            .returning(|_, _| Ok(false));

        let service = EquipmentService::new(mock_repo);
        let err = service
            .update_equipment(
                5,
                UpdateEquipment {
                    estado_operativo: Some(OperationalStatus::Obsoleto),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EquipmentError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_negative_cost_rejected_before_update() {
        let mut mock_repo = MockEquipmentRepository::new();
        mock_repo.expect_update().never();

        let service = EquipmentService::new(mock_repo);
        let err = service
            .update_equipment(
                1,
                UpdateEquipment {
                    costo_compra: Some(-10.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EquipmentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_validates_before_insert() {
        let mut mock_repo = MockEquipmentRepository::new();
        mock_repo.expect_create().never();

        let input: CreateEquipment = serde_json::from_value(serde_json::json!({
            "codigo_inventario": "",
            "categoria_id": 1,
            "nombre": "Proyector Epson"
        }))
        .unwrap();

        let service = EquipmentService::new(mock_repo);
        let err = service.create_equipment(input).await.unwrap_err();

        assert!(matches!(err, EquipmentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_returns_new_id() {
        let mut mock_repo = MockEquipmentRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.codigo_inventario == "PRY-010")
            .returning(|_| Ok(10));

        let input: CreateEquipment = serde_json::from_value(serde_json::json!({
            "codigo_inventario": "PRY-010",
            "categoria_id": 3,
            "nombre": "Proyector Epson"
        }))
        .unwrap();

        let service = EquipmentService::new(mock_repo);
        assert_eq!(service.create_equipment(input).await.unwrap(), 10);
    }
}
