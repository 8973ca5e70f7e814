use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{
    ApiQuery,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use chrono::Local;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ReportResult;
use crate::models::{
    CategoryCount, CostsQuery, Dashboard, ExportKind, ExportRequest, LocationCount, MonthlyCost,
    StatusCount,
};
use crate::repository::ReportRepository;
use crate::service::ReportService;

const TAG: &str = "reportes";

/// OpenAPI documentation for the reports service
#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard,
        equipment_by_location,
        equipment_by_status,
        equipment_by_category,
        maintenance_costs,
        export_pdf
    ),
    components(
        schemas(
            Dashboard,
            LocationCount,
            StatusCount,
            CategoryCount,
            MonthlyCost,
            ExportKind,
            ExportRequest
        ),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Dashboards, aggregates and PDF exports")
    )
)]
pub struct ApiDoc;

/// Create the reports router
pub fn router<R: ReportRepository + 'static>(service: ReportService<R>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/equipos-por-ubicacion", get(equipment_by_location))
        .route("/equipos-por-estado", get(equipment_by_status))
        .route("/equipos-por-categoria", get(equipment_by_category))
        .route("/costos-mantenimiento", get(maintenance_costs))
        .route("/export/pdf", post(export_pdf))
        .with_state(Arc::new(service))
}

/// Headline inventory and maintenance metrics
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = TAG,
    responses(
        (status = 200, description = "Dashboard for the current month", body = Dashboard),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn dashboard<R: ReportRepository>(
    State(service): State<Arc<ReportService<R>>>,
) -> ReportResult<Json<Dashboard>> {
    let today = Local::now().date_naive();
    Ok(Json(service.dashboard(today).await?))
}

/// Equipment count per location
#[utoipa::path(
    get,
    path = "/equipos-por-ubicacion",
    tag = TAG,
    responses(
        (status = 200, description = "Counts per location", body = Vec<LocationCount>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn equipment_by_location<R: ReportRepository>(
    State(service): State<Arc<ReportService<R>>>,
) -> ReportResult<Json<Vec<LocationCount>>> {
    Ok(Json(service.equipment_by_location().await?))
}

/// Equipment count per operational status
#[utoipa::path(
    get,
    path = "/equipos-por-estado",
    tag = TAG,
    responses(
        (status = 200, description = "Counts per status", body = Vec<StatusCount>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn equipment_by_status<R: ReportRepository>(
    State(service): State<Arc<ReportService<R>>>,
) -> ReportResult<Json<Vec<StatusCount>>> {
    Ok(Json(service.equipment_by_status().await?))
}

/// Equipment count and purchase value per category
#[utoipa::path(
    get,
    path = "/equipos-por-categoria",
    tag = TAG,
    responses(
        (status = 200, description = "Counts and value per category", body = Vec<CategoryCount>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn equipment_by_category<R: ReportRepository>(
    State(service): State<Arc<ReportService<R>>>,
) -> ReportResult<Json<Vec<CategoryCount>>> {
    Ok(Json(service.equipment_by_category().await?))
}

/// Completed maintenance cost per month and type
#[utoipa::path(
    get,
    path = "/costos-mantenimiento",
    tag = TAG,
    params(CostsQuery),
    responses(
        (status = 200, description = "Monthly costs", body = Vec<MonthlyCost>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn maintenance_costs<R: ReportRepository>(
    State(service): State<Arc<ReportService<R>>>,
    ApiQuery(query): ApiQuery<CostsQuery>,
) -> ReportResult<Json<Vec<MonthlyCost>>> {
    let today = Local::now().date_naive();
    Ok(Json(service.maintenance_costs(query.year, today).await?))
}

/// Download the equipment or maintenance listing as PDF
#[utoipa::path(
    post,
    path = "/export/pdf",
    tag = TAG,
    request_body(content = Option<ExportRequest>, description = "Listing to export, `equipos` by default"),
    responses(
        (status = 200, description = "PDF attachment", content_type = "application/pdf"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn export_pdf<R: ReportRepository>(
    State(service): State<Arc<ReportService<R>>>,
    body: Bytes,
) -> ReportResult<Response> {
    let kind = ExportRequest::from_body(&body)?.kind()?;
    let pdf = service.export_pdf(kind, Local::now().naive_local()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.filename()),
            ),
        ],
        pdf,
    )
        .into_response())
}
