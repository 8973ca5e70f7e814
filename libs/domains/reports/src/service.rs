use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::sync::Arc;

use crate::error::ReportResult;
use crate::models::{
    CategoryCount, Dashboard, EquipmentSummary, ExportKind, LocationCount, MaintenanceSummary,
    MonthlyCost, StatusCount, month_bounds,
};
use crate::pdf::TextDocument;
use crate::repository::ReportRepository;

const EMPTY_LISTING: &str = "Sin registros";

/// Service layer for dashboards, aggregates and PDF exports
#[derive(Clone)]
pub struct ReportService<R: ReportRepository> {
    repository: Arc<R>,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Dashboard for the calendar month containing `today`
    pub async fn dashboard(&self, today: NaiveDate) -> ReportResult<Dashboard> {
        let (start, next) = month_bounds(today);
        let counts = self.repository.dashboard_counts(start, next).await?;
        Ok(Dashboard::from_counts(counts))
    }

    pub async fn equipment_by_location(&self) -> ReportResult<Vec<LocationCount>> {
        self.repository.equipment_by_location().await
    }

    pub async fn equipment_by_status(&self) -> ReportResult<Vec<StatusCount>> {
        self.repository.equipment_by_status().await
    }

    pub async fn equipment_by_category(&self) -> ReportResult<Vec<CategoryCount>> {
        self.repository.equipment_by_category().await
    }

    /// Monthly maintenance costs; `year` defaults to the year of `today`
    pub async fn maintenance_costs(
        &self,
        year: Option<i32>,
        today: NaiveDate,
    ) -> ReportResult<Vec<MonthlyCost>> {
        self.repository
            .maintenance_costs(year.unwrap_or_else(|| today.year()))
            .await
    }

    /// Render the requested listing as a PDF document
    pub async fn export_pdf(
        &self,
        kind: ExportKind,
        generated_at: NaiveDateTime,
    ) -> ReportResult<Vec<u8>> {
        let subtitle = format!("Generado: {}", generated_at.format("%Y-%m-%d %H:%M"));

        let document = match kind {
            ExportKind::Equipos => {
                let rows = self.repository.equipment_for_export().await?;
                listing(
                    TextDocument::new("Reporte de Equipos").with_subtitle(subtitle),
                    rows.iter().map(equipment_line),
                )
            }
            ExportKind::Mantenimientos => {
                let rows = self.repository.maintenance_for_export().await?;
                listing(
                    TextDocument::new("Reporte de Mantenimientos").with_subtitle(subtitle),
                    rows.iter().map(maintenance_line),
                )
            }
        };

        let bytes = document.render();
        tracing::info!(kind = %kind, pages = document.page_count(), bytes = bytes.len(), "Rendered PDF report");
        Ok(bytes)
    }
}

fn listing(mut document: TextDocument, lines: impl Iterator<Item = String>) -> TextDocument {
    let mut empty = true;
    for line in lines {
        empty = false;
        document.push_line(line);
    }
    if empty {
        document.push_line(EMPTY_LISTING);
    }
    document
}

pub(crate) fn equipment_line(row: &EquipmentSummary) -> String {
    [
        row.codigo_inventario.as_str(),
        row.nombre.as_str(),
        row.categoria.as_deref().unwrap_or("-"),
        row.estado.as_str(),
        row.ubicacion.as_deref().unwrap_or("-"),
    ]
    .join(" | ")
}

pub(crate) fn maintenance_line(row: &MaintenanceSummary) -> String {
    let costo = row
        .costo
        .map(|c| format!("{:.2}", c))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} | {} | {} | {} | {}",
        row.fecha_programada.format("%Y-%m-%d"),
        row.codigo_inventario,
        row.tipo,
        row.estado,
        costo
    )
}
