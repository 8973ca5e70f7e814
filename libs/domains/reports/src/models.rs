use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ReportError, ReportResult};

/// Headline metrics for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub total_equipos: i64,
    pub equipos_operativos: i64,
    /// Percentage of operational equipment, one decimal
    pub tasa_disponibilidad: f64,
    pub valor_inventario: f64,
    /// Orders scheduled in the current month
    pub mantenimientos_mes: i64,
    /// Everything that is not operational
    pub equipos_reparacion: i64,
    /// Cost of orders completed in the current month
    pub costo_mantenimiento_mes: f64,
}

/// Raw aggregates the dashboard is derived from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardCounts {
    pub total_equipos: i64,
    pub equipos_operativos: i64,
    pub valor_inventario: f64,
    pub mantenimientos_mes: i64,
    pub costo_mantenimiento_mes: f64,
}

impl Dashboard {
    pub fn from_counts(counts: DashboardCounts) -> Self {
        Self {
            tasa_disponibilidad: availability_rate(counts.equipos_operativos, counts.total_equipos),
            equipos_reparacion: counts.total_equipos - counts.equipos_operativos,
            total_equipos: counts.total_equipos,
            equipos_operativos: counts.equipos_operativos,
            valor_inventario: counts.valor_inventario,
            mantenimientos_mes: counts.mantenimientos_mes,
            costo_mantenimiento_mes: counts.costo_mantenimiento_mes,
        }
    }
}

/// Percentage rounded to one decimal; 0 when there is no equipment.
pub fn availability_rate(operational: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (operational as f64 / total as f64 * 1000.0).round() / 10.0
}

/// First day of the month containing `day` and first day of the following month
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day.with_day(1).unwrap_or(day);
    let next = start
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    (start, next)
}

/// English month name for 1..=12
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationCount {
    pub ubicacion: String,
    pub cantidad: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub estado: String,
    pub cantidad: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub categoria: String,
    pub cantidad: i64,
    pub valor_total: f64,
}

/// Maintenance spend per month and type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyCost {
    pub mes: String,
    pub tipo: String,
    pub total_costo: f64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CostsQuery {
    /// Calendar year (defaults to the current year)
    pub year: Option<i32>,
}

/// Which listing to render as PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, ToSchema)]
#[strum(serialize_all = "snake_case")]
pub enum ExportKind {
    #[default]
    Equipos,
    Mantenimientos,
}

impl ExportKind {
    pub fn filename(&self) -> String {
        format!("reporte_{}.pdf", self)
    }
}

/// Body of `POST /export/pdf`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ExportRequest {
    #[serde(rename = "type", default)]
    pub report_type: Option<String>,
}

impl ExportRequest {
    /// Parse a raw request body; an empty body selects the equipment listing
    pub fn from_body(body: &[u8]) -> ReportResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| ReportError::InvalidRequest(format!("Cuerpo JSON inválido: {}", e)))
    }

    pub fn kind(&self) -> ReportResult<ExportKind> {
        match self.report_type.as_deref().map(str::trim) {
            None | Some("") => Ok(ExportKind::default()),
            Some(value) => ExportKind::from_str(value)
                .map_err(|_| ReportError::UnsupportedExport(value.to_string())),
        }
    }
}

/// Equipment line in the PDF listing
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentSummary {
    pub codigo_inventario: String,
    pub nombre: String,
    pub categoria: Option<String>,
    pub estado: String,
    pub ubicacion: Option<String>,
}

/// Maintenance line in the PDF listing
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceSummary {
    pub fecha_programada: NaiveDate,
    pub codigo_inventario: String,
    pub tipo: String,
    pub estado: String,
    pub costo: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_rate_rounding() {
        assert_eq!(availability_rate(2, 3), 66.7);
        assert_eq!(availability_rate(1, 8), 12.5);
        assert_eq!(availability_rate(5, 5), 100.0);
        assert_eq!(availability_rate(0, 0), 0.0);
    }

    #[test]
    fn test_dashboard_repair_count() {
        let dashboard = Dashboard::from_counts(DashboardCounts {
            total_equipos: 10,
            equipos_operativos: 7,
            valor_inventario: 25_000.0,
            mantenimientos_mes: 2,
            costo_mantenimiento_mes: 300.0,
        });
        assert_eq!(dashboard.equipos_reparacion, 3);
        assert_eq!(dashboard.tasa_disponibilidad, 70.0);
    }

    #[test]
    fn test_month_bounds_wraps_year() {
        let (start, next) = month_bounds(NaiveDate::from_ymd_opt(2025, 12, 17).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(next, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_month_names_are_english() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(9), Some("September"));
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_export_kind() {
        assert_eq!(ExportKind::from_str("mantenimientos").unwrap(), ExportKind::Mantenimientos);
        assert!(ExportKind::from_str("proveedores").is_err());
        assert_eq!(ExportKind::Equipos.filename(), "reporte_equipos.pdf");
    }

    #[test]
    fn test_export_request_from_body() {
        let kind = |body: &[u8]| ExportRequest::from_body(body).and_then(|r| r.kind());

        assert_eq!(kind(b"").unwrap(), ExportKind::Equipos);
        assert_eq!(kind(b"{}").unwrap(), ExportKind::Equipos);
        assert_eq!(
            kind(br#"{"type": "mantenimientos"}"#).unwrap(),
            ExportKind::Mantenimientos
        );
        assert!(matches!(
            kind(br#"{"type": "usuarios"}"#),
            Err(ReportError::UnsupportedExport(t)) if t == "usuarios"
        ));
        assert!(matches!(kind(b"{type"), Err(ReportError::InvalidRequest(_))));
    }
}
