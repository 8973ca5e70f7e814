use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error("Maintenance order not found: {0}")]
    NotFound(i32),

    #[error("Equipment {0} does not exist")]
    UnknownEquipment(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No fields to update")]
    NothingToUpdate,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type MaintenanceResult<T> = Result<T, MaintenanceError>;

impl From<MaintenanceError> for AppError {
    fn from(err: MaintenanceError) -> Self {
        match err {
            MaintenanceError::NotFound(_) => {
                AppError::NotFound("Mantenimiento no encontrado".to_string())
            }
            MaintenanceError::UnknownEquipment(id) => {
                AppError::BadRequest(format!("El equipo {} no existe", id))
            }
            MaintenanceError::Validation(msg) => AppError::BadRequest(msg),
            MaintenanceError::NothingToUpdate => {
                AppError::BadRequest("Nada que actualizar".to_string())
            }
            MaintenanceError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for MaintenanceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
