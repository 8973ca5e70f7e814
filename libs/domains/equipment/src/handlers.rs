use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use axum_helpers::{
    ApiQuery, Created, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::EquipmentResult;
use crate::models::{
    Category, CreateEquipment, Equipment, EquipmentFilter, Location, OperationalStatus,
    UpdateEquipment,
};
use crate::repository::EquipmentRepository;
use crate::service::EquipmentService;

const TAG: &str = "equipos";

/// OpenAPI documentation for the equipment service
#[derive(OpenApi)]
#[openapi(
    paths(
        list_equipment,
        create_equipment,
        get_equipment,
        update_equipment,
        list_categories,
        list_locations,
    ),
    components(
        schemas(
            Equipment,
            CreateEquipment,
            UpdateEquipment,
            OperationalStatus,
            Category,
            Location,
            MessageResponse,
            axum_helpers::Created
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Equipment inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Confirmation body for updates
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the equipment router with all HTTP endpoints
pub fn router<R: EquipmentRepository + 'static>(service: EquipmentService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/equipos", get(list_equipment).post(create_equipment))
        .route("/equipos/{id}", get(get_equipment).put(update_equipment))
        .route("/categorias", get(list_categories))
        .route("/ubicaciones", get(list_locations))
        .with_state(shared_service)
}

/// List equipment with optional filters
#[utoipa::path(
    get,
    path = "/equipos",
    tag = TAG,
    params(EquipmentFilter),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_equipment<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    ApiQuery(filter): ApiQuery<EquipmentFilter>,
) -> EquipmentResult<Json<Vec<Equipment>>> {
    let equipment = service.list_equipment(filter).await?;
    Ok(Json(equipment))
}

/// Register new equipment
#[utoipa::path(
    post,
    path = "/equipos",
    tag = TAG,
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = axum_helpers::Created),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_equipment<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEquipment>,
) -> EquipmentResult<Created> {
    let id = service.create_equipment(input).await?;
    Ok(Created::new(id, "Equipo creado"))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipos/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment found", body = Equipment),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_equipment<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    IdPath(id): IdPath,
) -> EquipmentResult<Json<Equipment>> {
    let equipment = service.get_equipment(id).await?;
    Ok(Json(equipment))
}

/// Partially update equipment
#[utoipa::path(
    put,
    path = "/equipos/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_equipment<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateEquipment>,
) -> EquipmentResult<Json<MessageResponse>> {
    service.update_equipment(id, input).await?;
    Ok(Json(MessageResponse {
        message: "Equipo actualizado".to_string(),
    }))
}

/// List equipment categories
#[utoipa::path(
    get,
    path = "/categorias",
    tag = TAG,
    responses(
        (status = 200, description = "Categories ordered by name", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
) -> EquipmentResult<Json<Vec<Category>>> {
    Ok(Json(service.list_categories().await?))
}

/// List active locations
#[utoipa::path(
    get,
    path = "/ubicaciones",
    tag = TAG,
    responses(
        (status = 200, description = "Active locations", body = Vec<Location>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_locations<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
) -> EquipmentResult<Json<Vec<Location>>> {
    Ok(Json(service.list_locations().await?))
}
