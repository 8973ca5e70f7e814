//! API Gateway
//!
//! Single entry point for the TI services. Every request under
//! `/api/{service_id}/...` is forwarded to the upstream registered for
//! `service_id` and the upstream reply is relayed unchanged.
//!
//! ```text
//! client ──► /api/equipos/equipos?estado=operativo
//!               │  RouteTable["equipos"] = http://equipos-service:8000
//!               ▼
//!            GET http://equipos-service:8000/equipos?estado=operativo
//! ```

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{MethodRouter, get},
};
use axum_helpers::{create_cors_layer, create_proxy_router, health_router, parse_allowed_origins};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

pub use config::GatewayConfig;
pub use error::{GatewayError, StartupError};
pub use routes::{RouteTable, ServiceId, Upstream, UpstreamSettings};

/// OpenAPI documentation for the gateway's own endpoints
#[derive(OpenApi)]
#[openapi(
    paths(root, list_routes),
    components(schemas(RouteInfo, ServiceId)),
    tags((name = "gateway", description = "Gateway status and routing table"))
)]
pub struct ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct RouteInfo {
    pub service: ServiceId,
    pub base_url: String,
}

/// Gateway liveness banner
#[utoipa::path(
    get,
    path = "/",
    tag = "gateway",
    responses((status = 200, description = "Gateway is running"))
)]
async fn root() -> Json<Value> {
    Json(json!({"message": "API Gateway running"}))
}

/// Configured services and their base URLs
#[utoipa::path(
    get,
    path = "/routes",
    tag = "gateway",
    responses((status = 200, description = "Routing table", body = Vec<RouteInfo>))
)]
async fn list_routes(State(routes): State<Arc<RouteTable>>) -> Json<Vec<RouteInfo>> {
    Json(
        routes
            .entries()
            .into_iter()
            .map(|(service, base_url)| RouteInfo {
                service,
                base_url: base_url.to_string(),
            })
            .collect(),
    )
}

fn forwarded() -> MethodRouter<Arc<RouteTable>> {
    get(proxy::proxy)
        .post(proxy::proxy)
        .put(proxy::proxy)
        .delete(proxy::proxy)
}

/// Gateway routes over a route table
pub fn router(routes: Arc<RouteTable>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/routes", get(list_routes))
        .route("/api/{service_id}", forwarded())
        .route("/api/{service_id}/", forwarded())
        .route("/api/{service_id}/{*path}", forwarded())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(routes)
}

/// Full application: gateway routes, shared middleware, health and optional CORS
pub fn build_app(config: &GatewayConfig) -> Result<Router, StartupError> {
    let routes = Arc::new(RouteTable::new(&config.services, &config.upstream)?);

    let mut app = create_proxy_router::<ApiDoc>(router(routes, config.max_body_bytes))
        .merge(health_router(config.app));

    if let Some(raw) = &config.cors_allowed_origins {
        let origins = parse_allowed_origins(raw).map_err(StartupError::Cors)?;
        app = app.layer(create_cors_layer(origins));
    }

    Ok(app)
}
