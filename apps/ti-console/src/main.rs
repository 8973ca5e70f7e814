//! TI console
//!
//! Command-line front end of the inventory platform. Every command is one
//! call through the API gateway.

use clap::{Parser, Subcommand, ValueEnum};
use core_config::FromEnv;
use core_config::tracing::{init_cli_tracing, install_color_eyre};
use eyre::{Result, WrapErr};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use ti_console::render::{self, Columns};
use ti_console::{ClientError, ConsoleConfig, GatewayClient};

#[derive(Parser)]
#[command(name = "ti-console")]
#[command(about = "Consola del inventario y mantenimiento de equipos TI")]
#[command(version)]
struct Cli {
    /// Gateway base URL (overrides API_GATEWAY_URL)
    #[arg(long, global = true)]
    gateway: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inventory and maintenance indicators
    Dashboard,

    /// List equipment
    Equipos {
        /// Category name
        #[arg(long)]
        categoria: Option<String>,

        /// Operational status (operativo, en_mantenimiento, en_reparacion, obsoleto, dado_de_baja)
        #[arg(long)]
        estado: Option<String>,
    },

    /// List equipment categories
    Categorias,

    /// List active locations
    Ubicaciones,

    /// List providers
    Proveedores,

    /// List maintenance orders
    Mantenimientos {
        /// Order status (programado, en_proceso, completado, cancelado)
        #[arg(long)]
        estado: Option<String>,

        /// Only orders of this equipment
        #[arg(long)]
        equipo_id: Option<i32>,
    },

    /// Completed maintenance cost per month and type
    Costos {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Latest notifications
    Notificaciones {
        /// Show read notifications instead of unread ones
        #[arg(long)]
        leidas: bool,
    },

    /// Mark one notification as read
    MarcarLeida { id: i32 },

    /// Run every monitoring agent once
    RunAgents,

    /// Download a PDF report
    ExportPdf {
        #[arg(long = "type", value_enum, default_value_t = ExportKind::Equipos)]
        kind: ExportKind,

        /// Destination file (defaults to the name suggested by the server)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportKind {
    Equipos,
    Mantenimientos,
}

impl ExportKind {
    fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Equipos => "equipos",
            ExportKind::Mantenimientos => "mantenimientos",
        }
    }
}

fn print_listing(title: &str, rows: &[Value], columns: Columns) {
    println!("{}", title);
    println!("{}", render::listing_text(rows, columns));
}

async fn run(client: &GatewayClient, command: Commands) -> Result<()> {
    match command {
        Commands::Dashboard => {
            let summary = client.dashboard().await?;
            println!("{}", render::dashboard(&summary));
        }
        Commands::Equipos { categoria, estado } => {
            let rows = client
                .equipment(categoria.as_deref(), estado.as_deref())
                .await?;
            print_listing("Equipos", &rows, render::EQUIPMENT_COLUMNS);
        }
        Commands::Categorias => {
            let rows = client.categories().await?;
            print_listing("Categorías", &rows, render::CATEGORY_COLUMNS);
        }
        Commands::Ubicaciones => {
            let rows = client.locations().await?;
            print_listing("Ubicaciones", &rows, render::LOCATION_COLUMNS);
        }
        Commands::Proveedores => {
            let rows = client.providers().await?;
            print_listing("Proveedores", &rows, render::PROVIDER_COLUMNS);
        }
        Commands::Mantenimientos { estado, equipo_id } => {
            let rows = client.maintenance(estado.as_deref(), equipo_id).await?;
            print_listing("Mantenimientos", &rows, render::MAINTENANCE_COLUMNS);
        }
        Commands::Costos { year } => {
            let rows = client.maintenance_costs(year).await?;
            print_listing("Costos de mantenimiento", &rows, render::COST_COLUMNS);
        }
        Commands::Notificaciones { leidas } => {
            let rows = client.notifications(leidas).await?;
            let title = if leidas {
                "Notificaciones leídas"
            } else {
                "Notificaciones pendientes"
            };
            print_listing(title, &rows, render::NOTIFICATION_COLUMNS);
        }
        Commands::MarcarLeida { id } => {
            let reply = client.mark_notification_read(id).await?;
            println!("{}", render::cell(reply.get("message")));
        }
        Commands::RunAgents => {
            let summary = client.run_agents().await?;
            println!(
                "{} ({} notificaciones creadas)",
                render::cell(summary.get("message")),
                render::cell(summary.get("notificaciones_creadas"))
            );
            if let Some(Value::Array(agents)) = summary.get("agentes") {
                println!("{}", render::listing_text(agents, render::AGENT_COLUMNS));
            }
        }
        Commands::ExportPdf { kind, output } => {
            let download = client.export_pdf(kind.as_str()).await?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(
                    download
                        .filename
                        .clone()
                        .unwrap_or_else(|| format!("reporte_{}.pdf", kind.as_str())),
                )
            });
            tokio::fs::write(&path, &download.bytes)
                .await
                .wrap_err_with(|| format!("No se pudo escribir {}", path.display()))?;
            println!(
                "Reporte guardado en {} ({} bytes)",
                path.display(),
                download.bytes.len()
            );
        }
    }
    Ok(())
}

/// One-line description of a failed gateway call
fn describe(err: &ClientError) -> String {
    match err {
        ClientError::Gateway { status, message } => {
            format!("Error {}: {}", status.as_u16(), message)
        }
        other => format!("Error: {}", other),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    install_color_eyre();
    init_cli_tracing();

    let cli = Cli::parse();
    let mut config = ConsoleConfig::from_env()?;
    if let Some(url) = cli.gateway {
        config.gateway_url = url;
    }
    let client = GatewayClient::new(&config)?;

    match run(&client, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(report) => match report.downcast_ref::<ClientError>() {
            Some(err) => {
                eprintln!("{}", describe(err));
                Ok(ExitCode::FAILURE)
            }
            None => Err(report),
        },
    }
}
