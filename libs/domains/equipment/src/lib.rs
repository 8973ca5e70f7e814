//! Equipment Domain
//!
//! Inventory of IT equipment plus the category and location catalogs it
//! references. Served by `ti-services serve equipos`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /equipos, /categorias, /ubicaciones
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, not-found / empty-update rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← PostgreSQL (raw SQL joins) or in-memory
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_equipment::{EquipmentService, PgEquipmentRepository};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//! let service = EquipmentService::new(PgEquipmentRepository::new(db));
//! let router = domain_equipment::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{EquipmentError, EquipmentResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, CreateEquipment, Equipment, EquipmentFilter, Location, OperationalStatus,
    UpdateEquipment,
};
pub use postgres::PgEquipmentRepository;
pub use repository::{EquipmentRepository, InMemoryEquipmentRepository};
pub use service::EquipmentService;
