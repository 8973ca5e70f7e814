use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider with RUC '{0}' already exists")]
    DuplicateRuc(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::DuplicateRuc(ruc) => {
                AppError::Conflict(format!("Ya existe un proveedor con RUC '{}'", ruc))
            }
            ProviderError::Validation(msg) => AppError::BadRequest(msg),
            ProviderError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
