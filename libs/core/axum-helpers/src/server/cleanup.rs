//! Connection cleanup run during graceful shutdown.

use tracing::{error, info};

/// Closes a sea-orm PostgreSQL pool and logs the outcome.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::close_postgres;
///
/// let cleanup = close_postgres(db.clone(), "equipos");
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!("PostgreSQL connection '{}' closed successfully", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}
