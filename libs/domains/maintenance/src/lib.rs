//! Maintenance Domain
//!
//! Preventive and corrective maintenance orders for inventoried equipment.
//! Served by `ti-services serve mantenimientos`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{MaintenanceError, MaintenanceResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateMaintenance, Maintenance, MaintenanceFilter, MaintenancePriority, MaintenanceStatus,
    MaintenanceType, UpdateMaintenance,
};
pub use postgres::PgMaintenanceRepository;
pub use repository::{InMemoryMaintenanceRepository, MaintenanceRepository};
pub use service::MaintenanceService;
