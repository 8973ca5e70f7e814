use core_config::{
    app_info, env_parse_or, server::ServerConfig, AppInfo, ConfigError, Environment, FromEnv,
};
use std::time::Duration;

use crate::routes::{ServiceId, UpstreamSettings};

/// Default request body limit (16 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub upstream: UpstreamSettings,
    pub max_body_bytes: usize,
    /// Comma-separated origins; no CORS layer when unset
    pub cors_allowed_origins: Option<String>,
    pub services: Vec<(ServiceId, String)>,
}

impl GatewayConfig {
    /// Development defaults for the given routes
    pub fn new(services: Vec<(ServiceId, String)>) -> Self {
        Self {
            app: app_info!("api-gateway"),
            server: ServerConfig::default(),
            environment: Environment::Development,
            upstream: UpstreamSettings::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors_allowed_origins: None,
            services,
        }
    }
}

impl FromEnv for GatewayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = UpstreamSettings::default();
        let upstream = UpstreamSettings {
            timeout: Duration::from_secs(env_parse_or(
                "GATEWAY_UPSTREAM_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            connect_timeout: Duration::from_secs(env_parse_or(
                "GATEWAY_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout.as_secs(),
            )?),
            pool_max_idle_per_host: env_parse_or(
                "GATEWAY_POOL_IDLE_PER_HOST",
                defaults.pool_max_idle_per_host,
            )?,
        };

        Ok(Self {
            app: app_info!("api-gateway"),
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            upstream,
            max_body_bytes: env_parse_or("GATEWAY_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            services: ServiceId::configured_from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("GATEWAY_UPSTREAM_TIMEOUT_SECS", None::<&str>),
                ("GATEWAY_CONNECT_TIMEOUT_SECS", None),
                ("GATEWAY_MAX_BODY_BYTES", None),
                ("GATEWAY_POOL_IDLE_PER_HOST", None),
                ("CORS_ALLOWED_ORIGIN", None),
                ("PORT", None),
            ],
            || {
                let config = GatewayConfig::from_env().unwrap();
                assert_eq!(config.upstream.timeout, Duration::from_secs(30));
                assert_eq!(config.upstream.connect_timeout, Duration::from_secs(5));
                assert_eq!(config.upstream.pool_max_idle_per_host, 32);
                assert_eq!(config.max_body_bytes, 16_777_216);
                assert!(config.cors_allowed_origins.is_none());
                assert_eq!(config.services.len(), 5);
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("GATEWAY_UPSTREAM_TIMEOUT_SECS", Some("5")),
                ("GATEWAY_MAX_BODY_BYTES", Some("1024")),
                ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000")),
            ],
            || {
                let config = GatewayConfig::from_env().unwrap();
                assert_eq!(config.upstream.timeout, Duration::from_secs(5));
                assert_eq!(config.max_body_bytes, 1024);
                assert_eq!(
                    config.cors_allowed_origins.as_deref(),
                    Some("http://localhost:3000")
                );
            },
        );
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        temp_env::with_var("GATEWAY_UPSTREAM_TIMEOUT_SECS", Some("soon"), || {
            let err = GatewayConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "GATEWAY_UPSTREAM_TIMEOUT_SECS"));
        });
    }
}
