use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{MaintenanceError, MaintenanceResult};
use crate::models::{
    CreateMaintenance, Maintenance, MaintenanceFilter, MaintenanceStatus, UpdateMaintenance,
};

/// Repository trait for maintenance orders
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// List orders by scheduled date, earliest first
    async fn list(&self, filter: MaintenanceFilter) -> MaintenanceResult<Vec<Maintenance>>;

    /// Schedule an order and return its id
    async fn create(&self, input: CreateMaintenance) -> MaintenanceResult<i32>;

    /// Apply a partial update. Returns false when the id does not exist.
    async fn update(&self, id: i32, input: UpdateMaintenance) -> MaintenanceResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    orders: HashMap<i32, Maintenance>,
    /// equipo_id -> (nombre, codigo_inventario)
    equipment: HashMap<i32, (String, String)>,
    next_id: i32,
}

/// In-memory implementation of MaintenanceRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryMaintenanceRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryMaintenanceRepository {
    /// Repository that knows the given equipment as `(id, nombre, codigo_inventario)`
    pub fn with_equipment(equipment: Vec<(i32, String, String)>) -> Self {
        let store = Store {
            equipment: equipment
                .into_iter()
                .map(|(id, nombre, codigo)| (id, (nombre, codigo)))
                .collect(),
            ..Default::default()
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryMaintenanceRepository {
    async fn list(&self, filter: MaintenanceFilter) -> MaintenanceResult<Vec<Maintenance>> {
        let store = self.store.read().await;

        let mut result: Vec<Maintenance> = store
            .orders
            .values()
            .filter(|m| filter.estado.is_none_or(|estado| m.estado == estado))
            .filter(|m| filter.equipo_id.is_none_or(|id| m.equipo_id == id))
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            a.fecha_programada
                .cmp(&b.fecha_programada)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }

    async fn create(&self, input: CreateMaintenance) -> MaintenanceResult<i32> {
        let mut store = self.store.write().await;

        let Some((equipo_nombre, codigo_inventario)) = store.equipment.get(&input.equipo_id).cloned()
        else {
            return Err(MaintenanceError::UnknownEquipment(input.equipo_id));
        };

        store.next_id += 1;
        let id = store.next_id;
        store.orders.insert(
            id,
            Maintenance {
                id,
                equipo_id: input.equipo_id,
                tipo: input.tipo,
                fecha_programada: input.fecha_programada,
                fecha_realizada: None,
                descripcion: input.descripcion,
                prioridad: input.prioridad,
                estado: MaintenanceStatus::Programado,
                costo: None,
                observaciones: None,
                fecha_registro: Utc::now(),
                equipo_nombre,
                codigo_inventario,
            },
        );

        tracing::info!(maintenance_id = id, "Scheduled maintenance");
        Ok(id)
    }

    async fn update(&self, id: i32, input: UpdateMaintenance) -> MaintenanceResult<bool> {
        let mut store = self.store.write().await;

        let Some(order) = store.orders.get_mut(&id) else {
            return Ok(false);
        };

        if input.fecha_realizada.is_some() {
            order.fecha_realizada = input.fecha_realizada;
        }
        if input.costo.is_some() {
            order.costo = input.costo;
        }
        if let Some(estado) = input.estado {
            order.estado = estado;
        }
        if input.observaciones.is_some() {
            order.observaciones = input.observaciones;
        }

        tracing::info!(maintenance_id = id, "Updated maintenance");
        Ok(true)
    }
}
