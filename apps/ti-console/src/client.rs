//! Gateway HTTP client.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::config::ConsoleConfig;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The gateway (or the service behind it) answered with an error status
    #[error("{status}: {message}")]
    Gateway { status: StatusCode, message: String },

    #[error("No se pudo contactar el gateway: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Respuesta inválida del gateway: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Best human-readable message from an error body: the `message` field of a
/// JSON envelope, then `detail`, then the raw text, then the status reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(Value::String(text)) = map.get(key) {
                return text.clone();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Error desconocido")
        .to_string()
}

/// Binary payload with the file name suggested by the server
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

fn attachment_filename(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Client for `/api/{service}/...` calls through the gateway
#[derive(Clone)]
pub struct GatewayClient {
    base_url: String,
    http: Client,
}

impl GatewayClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, service: &str, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/api/{}/{}",
            self.base_url,
            service,
            path.trim_start_matches('/')
        );
        debug!(%method, %url, "Gateway request");
        self.http.request(method, url)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        Err(ClientError::Gateway {
            status,
            message: error_message(status, &body),
        })
    }

    async fn json(builder: RequestBuilder) -> Result<Value, ClientError> {
        let response = Self::send(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn list(builder: RequestBuilder) -> Result<Vec<Value>, ClientError> {
        match Self::json(builder).await? {
            Value::Array(rows) => Ok(rows),
            other => Err(ClientError::Decode(format!(
                "se esperaba una lista, se recibió {}",
                other
            ))),
        }
    }

    pub async fn dashboard(&self) -> Result<Value, ClientError> {
        Self::json(self.request(Method::GET, "reportes", "dashboard")).await
    }

    pub async fn maintenance_costs(&self, year: Option<i32>) -> Result<Vec<Value>, ClientError> {
        let mut builder = self.request(Method::GET, "reportes", "costos-mantenimiento");
        if let Some(year) = year {
            builder = builder.query(&[("year", year)]);
        }
        Self::list(builder).await
    }

    pub async fn equipment(
        &self,
        categoria: Option<&str>,
        estado: Option<&str>,
    ) -> Result<Vec<Value>, ClientError> {
        let query: Vec<(&str, &str)> = [("categoria", categoria), ("estado", estado)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();
        Self::list(self.request(Method::GET, "equipos", "equipos").query(&query)).await
    }

    pub async fn categories(&self) -> Result<Vec<Value>, ClientError> {
        Self::list(self.request(Method::GET, "equipos", "categorias")).await
    }

    pub async fn locations(&self) -> Result<Vec<Value>, ClientError> {
        Self::list(self.request(Method::GET, "equipos", "ubicaciones")).await
    }

    pub async fn providers(&self) -> Result<Vec<Value>, ClientError> {
        Self::list(self.request(Method::GET, "proveedores", "proveedores")).await
    }

    pub async fn maintenance(
        &self,
        estado: Option<&str>,
        equipo_id: Option<i32>,
    ) -> Result<Vec<Value>, ClientError> {
        let mut builder = self.request(Method::GET, "mantenimientos", "mantenimientos");
        if let Some(estado) = estado {
            builder = builder.query(&[("estado", estado)]);
        }
        if let Some(id) = equipo_id {
            builder = builder.query(&[("equipo_id", id)]);
        }
        Self::list(builder).await
    }

    pub async fn notifications(&self, read: bool) -> Result<Vec<Value>, ClientError> {
        let flag = if read { "true" } else { "false" };
        Self::list(
            self.request(Method::GET, "agents", "notificaciones")
                .query(&[("leida", flag)]),
        )
        .await
    }

    pub async fn mark_notification_read(&self, id: i32) -> Result<Value, ClientError> {
        Self::json(self.request(
            Method::PUT,
            "agents",
            &format!("notificaciones/{}/leida", id),
        ))
        .await
    }

    pub async fn run_agents(&self) -> Result<Value, ClientError> {
        Self::json(self.request(Method::POST, "agents", "run-all-agents")).await
    }

    pub async fn export_pdf(&self, kind: &str) -> Result<Download, ClientError> {
        let response = Self::send(
            self.request(Method::POST, "reportes", "export/pdf")
                .json(&json!({ "type": kind })),
        )
        .await?;

        let header_text = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let filename = header_text(header::CONTENT_DISPOSITION)
            .as_deref()
            .and_then(attachment_filename);
        let content_type = header_text(header::CONTENT_TYPE);

        let bytes = response.bytes().await?.to_vec();
        Ok(Download {
            filename,
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_envelope() {
        let body = r#"{"code":1012,"error":"ROUTE_NOT_FOUND","message":"Servicio 'x' no encontrado"}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Servicio 'x' no encontrado"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"detail":"Tipo inválido"}"#),
            "Tipo inválido"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "  upstream reset \n"),
            "upstream reset"
        );
        assert_eq!(error_message(StatusCode::GATEWAY_TIMEOUT, ""), "Gateway Timeout");
    }

    #[test]
    fn test_attachment_filename() {
        assert_eq!(
            attachment_filename("attachment; filename=\"reporte_equipos.pdf\""),
            Some("reporte_equipos.pdf".to_string())
        );
        assert_eq!(attachment_filename("inline"), None);
        assert_eq!(attachment_filename("attachment; filename=\"\""), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ConsoleConfig {
            gateway_url: "http://gateway:8000/".into(),
            ..ConsoleConfig::default()
        };
        let client = GatewayClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://gateway:8000");
    }
}
