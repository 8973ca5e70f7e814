use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use axum_helpers::{
    ApiQuery, IdPath,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use chrono::Local;
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::NotificationResult;
use crate::models::{AgentReport, AgentRunSummary, Notification, NotificationFilter, NotificationKind};
use crate::repository::NotificationRepository;
use crate::service::NotificationService;

const TAG: &str = "notificaciones";

/// OpenAPI documentation for the agents service
#[derive(OpenApi)]
#[openapi(
    paths(list_notifications, mark_read, run_all_agents),
    components(
        schemas(Notification, NotificationKind, AgentReport, AgentRunSummary, MessageResponse),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Notification feed and monitoring agents")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the notifications router
pub fn router<R: NotificationRepository + 'static>(service: NotificationService<R>) -> Router {
    Router::new()
        .route("/notificaciones", get(list_notifications))
        .route("/notificaciones/{id}/leida", put(mark_read))
        .route("/run-all-agents", post(run_all_agents))
        .with_state(Arc::new(service))
}

/// Latest notifications with the given read flag
#[utoipa::path(
    get,
    path = "/notificaciones",
    tag = TAG,
    params(NotificationFilter),
    responses(
        (status = 200, description = "Up to 10 notifications, newest first", body = Vec<Notification>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_notifications<R: NotificationRepository>(
    State(service): State<Arc<NotificationService<R>>>,
    ApiQuery(filter): ApiQuery<NotificationFilter>,
) -> NotificationResult<Json<Vec<Notification>>> {
    Ok(Json(service.list_notifications(filter).await?))
}

/// Mark a notification as read
#[utoipa::path(
    put,
    path = "/notificaciones/{id}/leida",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn mark_read<R: NotificationRepository>(
    State(service): State<Arc<NotificationService<R>>>,
    IdPath(id): IdPath,
) -> NotificationResult<Json<MessageResponse>> {
    service.mark_read(id).await?;
    Ok(Json(MessageResponse {
        message: "Notificación marcada como leída".to_string(),
    }))
}

/// Run every monitoring agent once
#[utoipa::path(
    post,
    path = "/run-all-agents",
    tag = TAG,
    responses(
        (status = 200, description = "Notifications created per agent", body = AgentRunSummary),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn run_all_agents<R: NotificationRepository>(
    State(service): State<Arc<NotificationService<R>>>,
) -> NotificationResult<Json<AgentRunSummary>> {
    let today = Local::now().date_naive();
    Ok(Json(service.run_all_agents(today).await?))
}
