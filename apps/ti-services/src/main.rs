//! TI services
//!
//! Runs one domain service (`equipos`, `proveedores`, `mantenimientos`,
//! `reportes` or `agents`) per process, or applies database migrations.

use axum_helpers::{close_postgres, create_production_app};
use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use eyre::Result;
use migration::Migrator;
use std::time::Duration;
use ti_services::{Config, ServiceKind, build_app};
use tracing::info;

#[derive(Parser)]
#[command(name = "ti-services")]
#[command(about = "Run a TI inventory domain service or apply database migrations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve one domain service over HTTP
    Serve {
        /// Service to host
        #[arg(value_enum)]
        service: ServiceKind,

        /// Apply pending migrations before serving
        #[arg(long)]
        migrate: bool,
    },

    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to database...");
    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    match cli.command {
        Commands::Migrate => {
            run_migrations::<Migrator>(&db, "ti-services")
                .await
                .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;
            close_postgres(db, "ti-services").await;
        }

        Commands::Serve { service, migrate } => {
            let name: &'static str = service.into();
            if migrate {
                run_migrations::<Migrator>(&db, name)
                    .await
                    .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;
            }

            let app = build_app(service, db.clone());

            info!(%service, "Starting service with production-ready shutdown (30s timeout)");
            create_production_app(
                app,
                &config.server,
                Duration::from_secs(30),
                close_postgres(db, name),
            )
            .await
            .map_err(|e| eyre::eyre!("Server error: {}", e))?;

            info!(%service, "Service shutdown complete");
        }
    }

    Ok(())
}
