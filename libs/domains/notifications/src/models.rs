use axum_helpers::empty_as_none;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// What raised a notification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// Warranty about to expire
    Garantia,
    /// Scheduled maintenance past its date
    MantenimientoVencido,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub tipo: String,
    pub titulo: String,
    pub mensaje: String,
    pub equipo_id: Option<i32>,
    pub leida: bool,
    pub fecha_creacion: DateTime<Utc>,
}

/// Notification produced by an agent, not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub tipo: NotificationKind,
    pub titulo: String,
    pub mensaje: String,
    pub equipo_id: Option<i32>,
}

/// Read flag as accepted on the query string: `0`, `1`, `true` or `false`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadFlag(pub bool);

impl FromStr for ReadFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(ReadFlag(true)),
            "0" | "false" => Ok(ReadFlag(false)),
            other => Err(format!("invalid read flag '{}', expected 0, 1, true or false", other)),
        }
    }
}

impl fmt::Display for ReadFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "1" } else { "0" })
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationFilter {
    /// `1`/`true` for read notifications, `0`/`false` (default) for unread
    #[serde(default, deserialize_with = "empty_as_none")]
    #[param(value_type = Option<String>)]
    pub leida: Option<ReadFlag>,
}

impl NotificationFilter {
    pub fn read(&self) -> bool {
        self.leida.map(|flag| flag.0).unwrap_or(false)
    }
}

/// Equipment whose warranty ends soon
#[derive(Debug, Clone, PartialEq)]
pub struct WarrantyCandidate {
    pub equipo_id: i32,
    pub codigo_inventario: String,
    pub nombre: String,
    pub fecha_garantia_fin: NaiveDate,
}

/// Maintenance order still `programado` after its date
#[derive(Debug, Clone, PartialEq)]
pub struct OverdueCandidate {
    pub mantenimiento_id: i32,
    pub equipo_id: i32,
    pub codigo_inventario: String,
    pub nombre: String,
    pub fecha_programada: NaiveDate,
}

/// Per-agent outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentReport {
    pub nombre: String,
    pub creadas: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentRunSummary {
    pub message: String,
    pub notificaciones_creadas: usize,
    pub agentes: Vec<AgentReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_flag_parsing() {
        assert_eq!("1".parse::<ReadFlag>().unwrap(), ReadFlag(true));
        assert_eq!("TRUE".parse::<ReadFlag>().unwrap(), ReadFlag(true));
        assert_eq!("0".parse::<ReadFlag>().unwrap(), ReadFlag(false));
        assert_eq!("false".parse::<ReadFlag>().unwrap(), ReadFlag(false));
        assert!("2".parse::<ReadFlag>().is_err());
        assert!("si".parse::<ReadFlag>().is_err());
    }

    #[test]
    fn test_filter_defaults_to_unread() {
        assert!(!NotificationFilter::default().read());
        let filter = NotificationFilter {
            leida: Some(ReadFlag(true)),
        };
        assert!(filter.read());
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(NotificationKind::Garantia.to_string(), "garantia");
        assert_eq!(
            NotificationKind::MantenimientoVencido.to_string(),
            "mantenimiento_vencido"
        );
    }
}
