use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{EquipmentError, EquipmentResult};
use crate::models::{
    Category, CreateEquipment, Equipment, EquipmentFilter, Location, UpdateEquipment,
};

/// Repository trait for equipment and its catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    /// List equipment, newest registration first
    async fn list(&self, filter: EquipmentFilter) -> EquipmentResult<Vec<Equipment>>;

    /// Get one equipment row by id
    async fn get_by_id(&self, id: i32) -> EquipmentResult<Option<Equipment>>;

    /// Insert equipment and return its new id
    async fn create(&self, input: CreateEquipment) -> EquipmentResult<i32>;

    /// Apply a partial update. Returns false when the id does not exist.
    async fn update(&self, id: i32, input: UpdateEquipment) -> EquipmentResult<bool>;

    /// All categories ordered by name
    async fn list_categories(&self) -> EquipmentResult<Vec<Category>>;

    /// Active locations
    async fn list_locations(&self) -> EquipmentResult<Vec<Location>>;
}

#[derive(Debug, Default)]
struct Store {
    equipment: HashMap<i32, Equipment>,
    categories: Vec<Category>,
    locations: Vec<Location>,
    providers: HashMap<i32, String>,
    next_id: i32,
}

/// In-memory implementation of EquipmentRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEquipmentRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEquipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository preloaded with catalogs and provider names
    pub fn with_catalogs(
        categories: Vec<Category>,
        locations: Vec<Location>,
        providers: Vec<(i32, String)>,
    ) -> Self {
        let store = Store {
            categories,
            locations,
            providers: providers.into_iter().collect(),
            ..Default::default()
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

impl Store {
    fn check_references(
        &self,
        categoria_id: Option<i32>,
        ubicacion_id: Option<i32>,
        proveedor_id: Option<i32>,
    ) -> EquipmentResult<()> {
        if let Some(id) = categoria_id {
            if !self.categories.iter().any(|c| c.id == id) {
                return Err(EquipmentError::InvalidReference(format!(
                    "La categoría {} no existe",
                    id
                )));
            }
        }
        if let Some(id) = ubicacion_id {
            if !self.locations.iter().any(|l| l.id == id) {
                return Err(EquipmentError::InvalidReference(format!(
                    "La ubicación {} no existe",
                    id
                )));
            }
        }
        if let Some(id) = proveedor_id {
            if !self.providers.contains_key(&id) {
                return Err(EquipmentError::InvalidReference(format!(
                    "El proveedor {} no existe",
                    id
                )));
            }
        }
        Ok(())
    }

    fn refresh_names(&self, equipment: &mut Equipment) {
        equipment.categoria_nombre = self
            .categories
            .iter()
            .find(|c| c.id == equipment.categoria_id)
            .map(|c| c.nombre.clone());
        equipment.ubicacion_nombre = equipment.ubicacion_actual_id.and_then(|id| {
            self.locations
                .iter()
                .find(|l| l.id == id)
                .map(|l| l.nombre_completo.clone())
        });
        equipment.proveedor_nombre = equipment
            .proveedor_id
            .and_then(|id| self.providers.get(&id).cloned());
    }
}

#[async_trait]
impl EquipmentRepository for InMemoryEquipmentRepository {
    async fn list(&self, filter: EquipmentFilter) -> EquipmentResult<Vec<Equipment>> {
        let store = self.store.read().await;

        let mut result: Vec<Equipment> = store
            .equipment
            .values()
            .filter(|e| {
                filter
                    .categoria
                    .as_ref()
                    .is_none_or(|name| e.categoria_nombre.as_ref() == Some(name))
            })
            .filter(|e| filter.estado.is_none_or(|estado| e.estado_operativo == estado))
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            b.fecha_registro
                .cmp(&a.fecha_registro)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(result)
    }

    async fn get_by_id(&self, id: i32) -> EquipmentResult<Option<Equipment>> {
        let store = self.store.read().await;
        Ok(store.equipment.get(&id).cloned())
    }

    async fn create(&self, input: CreateEquipment) -> EquipmentResult<i32> {
        let mut store = self.store.write().await;

        if store
            .equipment
            .values()
            .any(|e| e.codigo_inventario == input.codigo_inventario)
        {
            return Err(EquipmentError::DuplicateCode(input.codigo_inventario));
        }
        store.check_references(
            Some(input.categoria_id),
            input.ubicacion_actual_id,
            input.proveedor_id,
        )?;

        store.next_id += 1;
        let id = store.next_id;
        let mut equipment = Equipment {
            id,
            codigo_inventario: input.codigo_inventario,
            categoria_id: input.categoria_id,
            nombre: input.nombre,
            marca: input.marca,
            modelo: input.modelo,
            numero_serie: input.numero_serie,
            especificaciones: input.especificaciones,
            proveedor_id: input.proveedor_id,
            fecha_compra: input.fecha_compra,
            costo_compra: input.costo_compra,
            fecha_garantia_fin: input.fecha_garantia_fin,
            ubicacion_actual_id: input.ubicacion_actual_id,
            estado_operativo: input.estado_operativo,
            notas: input.notas,
            fecha_registro: Utc::now(),
            categoria_nombre: None,
            ubicacion_nombre: None,
            proveedor_nombre: None,
        };
        store.refresh_names(&mut equipment);
        store.equipment.insert(id, equipment);

        tracing::info!(equipment_id = id, "Created equipment");
        Ok(id)
    }

    async fn update(&self, id: i32, input: UpdateEquipment) -> EquipmentResult<bool> {
        let mut store = self.store.write().await;

        let Some(mut equipment) = store.equipment.get(&id).cloned() else {
            return Ok(false);
        };
        store.check_references(None, input.ubicacion_actual_id, input.proveedor_id)?;

        if let Some(estado) = input.estado_operativo {
            equipment.estado_operativo = estado;
        }
        if input.ubicacion_actual_id.is_some() {
            equipment.ubicacion_actual_id = input.ubicacion_actual_id;
        }
        if input.proveedor_id.is_some() {
            equipment.proveedor_id = input.proveedor_id;
        }
        if input.costo_compra.is_some() {
            equipment.costo_compra = input.costo_compra;
        }
        if input.fecha_garantia_fin.is_some() {
            equipment.fecha_garantia_fin = input.fecha_garantia_fin;
        }
        if input.notas.is_some() {
            equipment.notas = input.notas;
        }
        store.refresh_names(&mut equipment);
        store.equipment.insert(id, equipment);

        tracing::info!(equipment_id = id, "Updated equipment");
        Ok(true)
    }

    async fn list_categories(&self) -> EquipmentResult<Vec<Category>> {
        let store = self.store.read().await;
        let mut categories = store.categories.clone();
        categories.sort_by(|a, b| a.nombre.cmp(&b.nombre));
        Ok(categories)
    }

    async fn list_locations(&self) -> EquipmentResult<Vec<Location>> {
        let store = self.store.read().await;
        Ok(store.locations.iter().filter(|l| l.activo).cloned().collect())
    }
}
