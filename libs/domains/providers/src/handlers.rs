use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    Created, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProviderResult;
use crate::models::{CreateProvider, Provider};
use crate::repository::ProviderRepository;
use crate::service::ProviderService;

const TAG: &str = "proveedores";

/// OpenAPI documentation for the providers service
#[derive(OpenApi)]
#[openapi(
    paths(list_providers, create_provider),
    components(
        schemas(Provider, CreateProvider, axum_helpers::Created),
        responses(BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Equipment supplier endpoints")
    )
)]
pub struct ApiDoc;

/// Create the providers router
pub fn router<R: ProviderRepository + 'static>(service: ProviderService<R>) -> Router {
    Router::new()
        .route("/proveedores", get(list_providers).post(create_provider))
        .with_state(Arc::new(service))
}

/// List providers ordered by business name
#[utoipa::path(
    get,
    path = "/proveedores",
    tag = TAG,
    responses(
        (status = 200, description = "Providers", body = Vec<Provider>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_providers<R: ProviderRepository>(
    State(service): State<Arc<ProviderService<R>>>,
) -> ProviderResult<Json<Vec<Provider>>> {
    Ok(Json(service.list_providers().await?))
}

/// Register a provider
#[utoipa::path(
    post,
    path = "/proveedores",
    tag = TAG,
    request_body = CreateProvider,
    responses(
        (status = 201, description = "Provider created", body = axum_helpers::Created),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_provider<R: ProviderRepository>(
    State(service): State<Arc<ProviderService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProvider>,
) -> ProviderResult<Created> {
    let id = service.create_provider(input).await?;
    Ok(Created::new(id, "Proveedor registrado"))
}
