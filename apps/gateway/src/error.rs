use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::time::Duration;
use thiserror::Error;

use crate::routes::ServiceId;

/// Failures while routing or forwarding one request
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Unknown service '{0}'")]
    UnknownService(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unreadable request body: {0}")]
    InvalidBody(String),

    #[error("Service '{service}' unavailable: {source}")]
    Unavailable {
        service: ServiceId,
        source: reqwest::Error,
    },

    #[error("Service '{service}' timed out after {after:?}")]
    Timeout { service: ServiceId, after: Duration },

    #[error("Forwarding to '{service}' failed: {source}")]
    Transport {
        service: ServiceId,
        source: reqwest::Error,
    },
}

impl GatewayError {
    /// Classify an outbound failure. Connect failures win over timeouts.
    pub fn from_reqwest(service: ServiceId, error: reqwest::Error, bound: Duration) -> Self {
        if error.is_connect() {
            GatewayError::Unavailable {
                service,
                source: error,
            }
        } else if error.is_timeout() {
            GatewayError::Timeout {
                service,
                after: bound,
            }
        } else {
            GatewayError::Transport {
                service,
                source: error,
            }
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::UnknownService(id) => {
                AppError::RouteNotFound(format!("Servicio '{}' no encontrado", id))
            }
            GatewayError::PayloadTooLarge(msg) => AppError::PayloadTooLarge(msg),
            GatewayError::InvalidBody(msg) => AppError::BadRequest(msg),
            GatewayError::Unavailable { service, .. } => {
                AppError::ServiceUnavailable(format!("El servicio {} no está disponible", service))
            }
            GatewayError::Timeout { service, after } => AppError::GatewayTimeout(format!(
                "El servicio {} no respondió en {}s",
                service,
                after.as_secs_f64()
            )),
            GatewayError::Transport { source, .. } => AppError::InternalServerError(source.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Failures while assembling the gateway at startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid CORS_ALLOWED_ORIGIN: {0}")]
    Cors(String),
}
