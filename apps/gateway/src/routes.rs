//! Route table: service identifier to upstream base URL.
//!
//! Built once at startup and shared read-only by every request.

use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;

use crate::error::GatewayError;

/// Services reachable through `/api/{service_id}/...`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceId {
    Equipos,
    Proveedores,
    Mantenimientos,
    Reportes,
    Agents,
}

impl ServiceId {
    /// Environment variable holding the base URL
    pub fn env_var(&self) -> &'static str {
        match self {
            ServiceId::Equipos => "EQUIPOS_SERVICE_URL",
            ServiceId::Proveedores => "PROVEEDORES_SERVICE_URL",
            ServiceId::Mantenimientos => "MANTENIMIENTO_SERVICE_URL",
            ServiceId::Reportes => "REPORTES_SERVICE_URL",
            ServiceId::Agents => "AGENT_SERVICE_URL",
        }
    }

    pub fn default_url(&self) -> &'static str {
        match self {
            ServiceId::Equipos => "http://equipos-service:8000",
            ServiceId::Proveedores => "http://proveedores-service:8000",
            ServiceId::Mantenimientos => "http://mantenimiento-service:8000",
            ServiceId::Reportes => "http://reportes-service:8000",
            ServiceId::Agents => "http://agent-service:8000",
        }
    }

    /// Every service with its base URL from the environment or the default
    pub fn configured_from_env() -> Vec<(ServiceId, String)> {
        ServiceId::iter()
            .map(|id| (id, core_config::env_or_default(id.env_var(), id.default_url())))
            .collect()
    }
}

/// Outbound client settings shared by all upstreams
#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    /// Bound on the whole upstream exchange
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            pool_max_idle_per_host: 32,
        }
    }
}

/// One upstream service and its pooled client
#[derive(Debug, Clone)]
pub struct Upstream {
    base_url: String,
    client: reqwest::Client,
}

impl Upstream {
    fn new(base_url: &str, settings: &UpstreamSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `{base}/{path}` plus the raw query, untouched
    pub fn url_for(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", self.base_url, path, q),
            _ => format!("{}/{}", self.base_url, path),
        }
    }
}

/// Immutable mapping from service identifier to upstream
#[derive(Debug)]
pub struct RouteTable {
    upstreams: HashMap<ServiceId, Upstream>,
    timeout: Duration,
}

impl RouteTable {
    pub fn new(
        services: &[(ServiceId, String)],
        settings: &UpstreamSettings,
    ) -> Result<Self, reqwest::Error> {
        let upstreams = services
            .iter()
            .map(|(id, url)| Upstream::new(url, settings).map(|upstream| (*id, upstream)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            upstreams,
            timeout: settings.timeout,
        })
    }

    /// Look up a raw path segment. Unknown or unconfigured ids are routing errors.
    pub fn resolve(&self, raw: &str) -> Result<(ServiceId, &Upstream), GatewayError> {
        ServiceId::from_str(raw)
            .ok()
            .and_then(|id| self.upstreams.get(&id).map(|upstream| (id, upstream)))
            .ok_or_else(|| GatewayError::UnknownService(raw.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured routes in declaration order of `ServiceId`
    pub fn entries(&self) -> Vec<(ServiceId, &str)> {
        ServiceId::iter()
            .filter_map(|id| self.upstreams.get(&id).map(|u| (id, u.base_url())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(
            &[
                (ServiceId::Equipos, "http://equipos:8000/".to_string()),
                (ServiceId::Reportes, "http://reportes:8000".to_string()),
            ],
            &UpstreamSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_service_id_wire_names() {
        assert_eq!(ServiceId::from_str("mantenimientos").unwrap(), ServiceId::Mantenimientos);
        assert_eq!(ServiceId::Agents.to_string(), "agents");
        assert!(ServiceId::from_str("Equipos").is_err());
        assert_eq!(ServiceId::Mantenimientos.env_var(), "MANTENIMIENTO_SERVICE_URL");
    }

    #[test]
    fn test_resolve() {
        let table = table();
        let (id, upstream) = table.resolve("equipos").unwrap();
        assert_eq!(id, ServiceId::Equipos);
        assert_eq!(upstream.base_url(), "http://equipos:8000");

        assert!(matches!(
            table.resolve("usuarios"),
            Err(GatewayError::UnknownService(s)) if s == "usuarios"
        ));
        // Known id without a configured upstream
        assert!(table.resolve("agents").is_err());
    }

    #[test]
    fn test_url_for_keeps_raw_path_and_query() {
        let table = table();
        let (_, upstream) = table.resolve("equipos").unwrap();

        assert_eq!(upstream.url_for("", None), "http://equipos:8000/");
        assert_eq!(
            upstream.url_for("equipos/12", Some("tag=a&tag=b")),
            "http://equipos:8000/equipos/12?tag=a&tag=b"
        );
        assert_eq!(
            upstream.url_for("docs/a%20b", Some("")),
            "http://equipos:8000/docs/a%20b"
        );
    }

    #[test]
    fn test_defaults_from_env() {
        temp_env::with_vars(
            [
                ("EQUIPOS_SERVICE_URL", Some("http://localhost:9001")),
                ("AGENT_SERVICE_URL", None),
            ],
            || {
                let services = ServiceId::configured_from_env();
                assert_eq!(services.len(), 5);
                assert_eq!(services[0], (ServiceId::Equipos, "http://localhost:9001".to_string()));
                assert_eq!(
                    services[4],
                    (ServiceId::Agents, "http://agent-service:8000".to_string())
                );
            },
        );
    }
}
