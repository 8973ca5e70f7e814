//! Notifications Domain
//!
//! Notification feed plus the monitoring agents that fill it: warranties
//! about to expire and maintenance orders past their date.
//! Served by `ti-services serve agents`.

pub mod agents;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use agents::{Agent, OverdueMaintenanceAgent, WarrantyAgent, default_agents};
pub use error::{NotificationError, NotificationResult};
pub use handlers::ApiDoc;
pub use models::{
    AgentReport, AgentRunSummary, NewNotification, Notification, NotificationFilter,
    NotificationKind, OverdueCandidate, ReadFlag, WarrantyCandidate,
};
pub use postgres::PgNotificationRepository;
pub use repository::{InMemoryNotificationRepository, NotificationRepository};
pub use service::NotificationService;
