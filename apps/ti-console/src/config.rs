use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";

/// Console settings
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub gateway_url: String,
    /// Overall bound per request; PDF exports can take a while
    pub timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Environment variables:
/// - `API_GATEWAY_URL` (default: `http://localhost:8000`)
/// - `CONSOLE_TIMEOUT_SECS` (default: 60)
impl FromEnv for ConsoleConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            gateway_url: env_or_default("API_GATEWAY_URL", DEFAULT_GATEWAY_URL),
            timeout: Duration::from_secs(env_parse_or(
                "CONSOLE_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
        })
    }
}
