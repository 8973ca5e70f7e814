use axum_helpers::empty_as_none;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Operational status of a piece of equipment
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationalStatus {
    #[default]
    Operativo,
    EnMantenimiento,
    EnReparacion,
    Obsoleto,
    DadoDeBaja,
}

/// Equipment row as returned by the list/detail endpoints, with joined display names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub codigo_inventario: String,
    pub categoria_id: i32,
    pub nombre: String,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub numero_serie: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub especificaciones: Option<serde_json::Value>,
    pub proveedor_id: Option<i32>,
    pub fecha_compra: Option<NaiveDate>,
    pub costo_compra: Option<f64>,
    pub fecha_garantia_fin: Option<NaiveDate>,
    pub ubicacion_actual_id: Option<i32>,
    pub estado_operativo: OperationalStatus,
    pub notas: Option<String>,
    pub fecha_registro: DateTime<Utc>,
    /// Category name
    pub categoria_nombre: Option<String>,
    /// Location as `edificio - aula_oficina`
    pub ubicacion_nombre: Option<String>,
    /// Provider business name
    pub proveedor_nombre: Option<String>,
}

/// DTO for registering equipment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 50, message = "codigo_inventario is required"))]
    pub codigo_inventario: String,

    #[validate(range(min = 1, message = "categoria_id must be a valid id"))]
    pub categoria_id: i32,

    #[validate(length(min = 1, max = 200, message = "nombre is required"))]
    pub nombre: String,

    #[serde(default)]
    pub marca: Option<String>,

    #[serde(default)]
    pub modelo: Option<String>,

    #[serde(default)]
    pub numero_serie: Option<String>,

    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub especificaciones: Option<serde_json::Value>,

    #[serde(default)]
    pub proveedor_id: Option<i32>,

    #[serde(default)]
    pub fecha_compra: Option<NaiveDate>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "costo_compra cannot be negative"))]
    pub costo_compra: Option<f64>,

    #[serde(default)]
    pub fecha_garantia_fin: Option<NaiveDate>,

    #[serde(default)]
    pub ubicacion_actual_id: Option<i32>,

    #[serde(default)]
    pub estado_operativo: OperationalStatus,

    #[serde(default)]
    pub notas: Option<String>,
}

/// DTO for a partial equipment update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub estado_operativo: Option<OperationalStatus>,
    pub ubicacion_actual_id: Option<i32>,
    pub proveedor_id: Option<i32>,
    #[validate(range(min = 0.0, message = "costo_compra cannot be negative"))]
    pub costo_compra: Option<f64>,
    pub fecha_garantia_fin: Option<NaiveDate>,
    pub notas: Option<String>,
}

impl UpdateEquipment {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Query filters for listing equipment
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EquipmentFilter {
    /// Category name (exact match)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub categoria: Option<String>,

    /// Operational status
    #[serde(default, deserialize_with = "empty_as_none")]
    pub estado: Option<OperationalStatus>,
}

/// Equipment category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// Physical location (building and room)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub id: i32,
    pub edificio: String,
    pub aula_oficina: String,
    pub activo: bool,
    pub nombre_completo: String,
}

impl Location {
    pub fn display_name(edificio: &str, aula_oficina: &str) -> String {
        format!("{} - {}", edificio, aula_oficina)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_operational_status_wire_format() {
        assert_eq!(OperationalStatus::EnReparacion.to_string(), "en_reparacion");
        assert_eq!(
            OperationalStatus::from_str("dado_de_baja").unwrap(),
            OperationalStatus::DadoDeBaja
        );
        assert_eq!(
            serde_json::to_value(OperationalStatus::EnMantenimiento).unwrap(),
            "en_mantenimiento"
        );
        assert!(OperationalStatus::from_str("roto").is_err());
    }

    #[test]
    fn test_create_equipment_defaults_to_operativo() {
        let input: CreateEquipment = serde_json::from_value(serde_json::json!({
            "codigo_inventario": "PC-001",
            "categoria_id": 1,
            "nombre": "Dell OptiPlex"
        }))
        .unwrap();

        assert_eq!(input.estado_operativo, OperationalStatus::Operativo);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_equipment_requires_fields() {
        let input: CreateEquipment = serde_json::from_value(serde_json::json!({
            "codigo_inventario": "",
            "categoria_id": 0,
            "nombre": ""
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("codigo_inventario"));
        assert!(fields.contains_key("categoria_id"));
        assert!(fields.contains_key("nombre"));
    }

    #[test]
    fn test_update_equipment_is_empty() {
        assert!(UpdateEquipment::default().is_empty());
        let update = UpdateEquipment {
            notas: Some("Cambio de disco".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_location_display_name() {
        assert_eq!(
            Location::display_name("Pabellón A", "Laboratorio 101"),
            "Pabellón A - Laboratorio 101"
        );
    }
}
