use api_gateway::{GatewayConfig, build_app};
use axum_helpers::create_production_app;
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = GatewayConfig::from_env()?;
    init_tracing(&config.environment);

    for (service, url) in &config.services {
        info!(%service, %url, "Registered upstream");
    }
    info!(
        timeout_secs = config.upstream.timeout.as_secs(),
        max_body_bytes = config.max_body_bytes,
        "Upstream limits"
    );

    let app = build_app(&config)?;

    // The gateway holds no connections that need closing
    create_production_app(app, &config.server, Duration::from_secs(30), async {
        info!("Gateway shutting down");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("API gateway shutdown complete");
    Ok(())
}
