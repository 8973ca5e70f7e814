use axum_helpers::empty_as_none;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Kind of maintenance work
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaintenanceType {
    Preventivo,
    Correctivo,
    /// Older clients send `actualización software`
    #[serde(alias = "actualización software")]
    #[strum(to_string = "actualizacion_software", serialize = "actualización software")]
    ActualizacionSoftware,
}

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
pub enum MaintenancePriority {
    Baja,
    #[default]
    Media,
    Alta,
    Urgente,
}

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
pub enum MaintenanceStatus {
    #[default]
    Programado,
    EnProceso,
    Completado,
    Cancelado,
}

/// Maintenance order joined with the equipment it targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Maintenance {
    pub id: i32,
    pub equipo_id: i32,
    pub tipo: MaintenanceType,
    pub fecha_programada: NaiveDate,
    pub fecha_realizada: Option<NaiveDate>,
    pub descripcion: String,
    pub prioridad: MaintenancePriority,
    pub estado: MaintenanceStatus,
    pub costo: Option<f64>,
    pub observaciones: Option<String>,
    pub fecha_registro: DateTime<Utc>,
    pub equipo_nombre: String,
    pub codigo_inventario: String,
}

/// DTO for scheduling maintenance
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    #[validate(range(min = 1, message = "equipo_id must be a valid id"))]
    pub equipo_id: i32,

    pub tipo: MaintenanceType,

    pub fecha_programada: NaiveDate,

    #[validate(length(min = 1, message = "descripcion is required"))]
    pub descripcion: String,

    #[serde(default)]
    pub prioridad: MaintenancePriority,
}

/// DTO for recording progress on a maintenance order
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenance {
    pub fecha_realizada: Option<NaiveDate>,
    #[validate(range(min = 0.0, message = "costo cannot be negative"))]
    pub costo: Option<f64>,
    pub estado: Option<MaintenanceStatus>,
    pub observaciones: Option<String>,
}

impl UpdateMaintenance {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Query filters for listing maintenance orders
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaintenanceFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub estado: Option<MaintenanceStatus>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub equipo_id: Option<i32>,
}
