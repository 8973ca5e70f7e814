use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unsupported export type: {0}")]
    UnsupportedExport(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ReportResult<T> = Result<T, ReportError>;

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::UnsupportedExport(kind) => AppError::BadRequest(format!(
                "Tipo de reporte no soportado: '{}' (use 'equipos' o 'mantenimientos')",
                kind
            )),
            ReportError::InvalidRequest(msg) => AppError::BadRequest(msg),
            ReportError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
