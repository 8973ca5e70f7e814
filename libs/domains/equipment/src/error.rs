use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EquipmentError {
    #[error("Equipment not found: {0}")]
    NotFound(i32),

    #[error("Inventory code '{0}' already exists")]
    DuplicateCode(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No fields to update")]
    NothingToUpdate,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EquipmentResult<T> = Result<T, EquipmentError>;

impl From<EquipmentError> for AppError {
    fn from(err: EquipmentError) -> Self {
        match err {
            EquipmentError::NotFound(id) => AppError::NotFound(format!("Equipo {} no encontrado", id)),
            EquipmentError::DuplicateCode(code) => AppError::Conflict(format!(
                "Ya existe un equipo con código de inventario '{}'",
                code
            )),
            EquipmentError::InvalidReference(msg) | EquipmentError::Validation(msg) => {
                AppError::BadRequest(msg)
            }
            EquipmentError::NothingToUpdate => {
                AppError::BadRequest("Nada que actualizar".to_string())
            }
            EquipmentError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EquipmentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
