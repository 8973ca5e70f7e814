use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use axum_helpers::{
    ApiQuery, Created, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::MaintenanceResult;
use crate::models::{
    CreateMaintenance, Maintenance, MaintenanceFilter, MaintenancePriority, MaintenanceStatus,
    MaintenanceType, UpdateMaintenance,
};
use crate::repository::MaintenanceRepository;
use crate::service::MaintenanceService;

const TAG: &str = "mantenimientos";

/// OpenAPI documentation for the maintenance service
#[derive(OpenApi)]
#[openapi(
    paths(service_banner, list_maintenance, schedule_maintenance, update_maintenance),
    components(
        schemas(
            Maintenance,
            CreateMaintenance,
            UpdateMaintenance,
            MaintenanceType,
            MaintenancePriority,
            MaintenanceStatus,
            MessageResponse,
            axum_helpers::Created
        ),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Maintenance scheduling endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the maintenance router
pub fn router<R: MaintenanceRepository + 'static>(service: MaintenanceService<R>) -> Router {
    Router::new()
        .route("/", get(service_banner))
        .route(
            "/mantenimientos",
            get(list_maintenance).post(schedule_maintenance),
        )
        .route("/mantenimientos/{id}", put(update_maintenance))
        .with_state(Arc::new(service))
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    tag = TAG,
    responses((status = 200, description = "Service name"))
)]
async fn service_banner() -> Json<Value> {
    Json(json!({"service": "Mantenimiento Service"}))
}

/// List maintenance orders
#[utoipa::path(
    get,
    path = "/mantenimientos",
    tag = TAG,
    params(MaintenanceFilter),
    responses(
        (status = 200, description = "Orders by scheduled date", body = Vec<Maintenance>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_maintenance<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    ApiQuery(filter): ApiQuery<MaintenanceFilter>,
) -> MaintenanceResult<Json<Vec<Maintenance>>> {
    Ok(Json(service.list_maintenance(filter).await?))
}

/// Schedule maintenance for a piece of equipment
#[utoipa::path(
    post,
    path = "/mantenimientos",
    tag = TAG,
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Maintenance scheduled", body = axum_helpers::Created),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn schedule_maintenance<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateMaintenance>,
) -> MaintenanceResult<Created> {
    let id = service.schedule_maintenance(input).await?;
    Ok(Created::new(id, "Mantenimiento programado"))
}

/// Record progress on a maintenance order
#[utoipa::path(
    put,
    path = "/mantenimientos/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Maintenance order ID")
    ),
    request_body = UpdateMaintenance,
    responses(
        (status = 200, description = "Maintenance updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_maintenance<R: MaintenanceRepository>(
    State(service): State<Arc<MaintenanceService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateMaintenance>,
) -> MaintenanceResult<Json<MessageResponse>> {
    service.update_maintenance(id, input).await?;
    Ok(Json(MessageResponse {
        message: "Mantenimiento actualizado".to_string(),
    }))
}
