//! Providers Domain
//!
//! Suppliers that equipment is purchased from, keyed by RUC.
//! Served by `ti-services serve proveedores`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProviderError, ProviderResult};
pub use handlers::ApiDoc;
pub use models::{CreateProvider, Provider};
pub use postgres::PgProviderRepository;
pub use repository::{InMemoryProviderRepository, ProviderRepository};
pub use service::ProviderService;
