//! Reports Domain
//!
//! Read-only dashboards and aggregates over equipment and maintenance,
//! plus PDF listings. Served by `ti-services serve reportes`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod pdf;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ReportError, ReportResult};
pub use handlers::ApiDoc;
pub use models::{
    CategoryCount, CostsQuery, Dashboard, DashboardCounts, EquipmentSummary, ExportKind,
    ExportRequest, LocationCount, MaintenanceSummary, MonthlyCost, StatusCount,
};
pub use pdf::TextDocument;
pub use postgres::PgReportRepository;
pub use repository::{InMemoryReportRepository, ReportRepository, ReportSnapshot};
pub use service::ReportService;
