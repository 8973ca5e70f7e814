//! Domain service selection.

use axum::Router;
use axum_helpers::{create_router, health_router};
use clap::ValueEnum;
use core_config::{AppInfo, app_info};
use sea_orm::DatabaseConnection;
use strum::{Display, IntoStaticStr};

use crate::ready::ready_router;

/// Domain services this binary can host, named as the gateway routes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ServiceKind {
    Equipos,
    Proveedores,
    Mantenimientos,
    Reportes,
    Agents,
}

impl ServiceKind {
    /// Name and version reported by `/health`
    pub fn app_info(&self) -> AppInfo {
        match self {
            ServiceKind::Equipos => app_info!("equipos-service"),
            ServiceKind::Proveedores => app_info!("proveedores-service"),
            ServiceKind::Mantenimientos => app_info!("mantenimiento-service"),
            ServiceKind::Reportes => app_info!("reportes-service"),
            ServiceKind::Agents => app_info!("agent-service"),
        }
    }
}

/// Domain routes of `kind` over PostgreSQL repositories, with docs and shared middleware
pub fn api_router(kind: ServiceKind, db: DatabaseConnection) -> Router {
    match kind {
        ServiceKind::Equipos => {
            use domain_equipment::{ApiDoc, EquipmentService, PgEquipmentRepository, handlers};
            let service = EquipmentService::new(PgEquipmentRepository::new(db));
            create_router::<ApiDoc>(handlers::router(service))
        }
        ServiceKind::Proveedores => {
            use domain_providers::{ApiDoc, PgProviderRepository, ProviderService, handlers};
            let service = ProviderService::new(PgProviderRepository::new(db));
            create_router::<ApiDoc>(handlers::router(service))
        }
        ServiceKind::Mantenimientos => {
            use domain_maintenance::{ApiDoc, MaintenanceService, PgMaintenanceRepository, handlers};
            let service = MaintenanceService::new(PgMaintenanceRepository::new(db));
            create_router::<ApiDoc>(handlers::router(service))
        }
        ServiceKind::Reportes => {
            use domain_reports::{ApiDoc, PgReportRepository, ReportService, handlers};
            let service = ReportService::new(PgReportRepository::new(db));
            create_router::<ApiDoc>(handlers::router(service))
        }
        ServiceKind::Agents => {
            use domain_notifications::{
                ApiDoc, NotificationService, PgNotificationRepository, handlers,
            };
            let service = NotificationService::new(PgNotificationRepository::new(db));
            create_router::<ApiDoc>(handlers::router(service))
        }
    }
}

/// Complete application for one service:
/// - domain routes and `/api-docs/openapi.json`
/// - `/health`: liveness with service name/version
/// - `/ready`: database readiness
pub fn build_app(kind: ServiceKind, db: DatabaseConnection) -> Router {
    api_router(kind, db.clone())
        .merge(health_router(kind.app_info()))
        .merge(ready_router(db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_names_match_gateway_ids() {
        let names: Vec<String> = ServiceKind::value_variants()
            .iter()
            .map(|kind| kind.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["equipos", "proveedores", "mantenimientos", "reportes", "agents"]
        );
        assert_eq!(
            ServiceKind::from_str("mantenimientos", true).unwrap(),
            ServiceKind::Mantenimientos
        );
    }

    #[test]
    fn test_app_info_names() {
        assert_eq!(ServiceKind::Agents.app_info().name, "agent-service");
        assert_eq!(ServiceKind::Equipos.app_info().name, "equipos-service");
    }
}
