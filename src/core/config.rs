//! Configuration management for the MCP server.
//!
//! Settings come from defaults overridden by environment variables (a `.env`
//! file is loaded first when present).

use super::transport::TransportConfig;
use crate::dolibarr::{ConfigError, DEFAULT_TIMEOUT_SECS, EndpointConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Remote Dolibarr instance.
    pub dolibarr: DolibarrConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Connection settings for the Dolibarr REST API.
///
/// Values are kept raw here; [`Config::endpoint`] validates them.
#[derive(Clone, Serialize, Deserialize)]
pub struct DolibarrConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for DolibarrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DolibarrConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for DolibarrConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "dolibarr-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            dolibarr: DolibarrConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = env_non_empty("LOG_LEVEL").or_else(|| env_non_empty("MCP_LOG_LEVEL")) {
            config.logging.level = normalize_log_level(&level);
        }

        config.transport = TransportConfig::from_env();

        config.dolibarr.url = env_non_empty("DOLIBARR_URL");
        config.dolibarr.api_key = env_non_empty("DOLIBARR_API_KEY");

        if let Some(raw) = env_non_empty("DOLIBARR_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.dolibarr.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid DOLIBARR_TIMEOUT_SECS={:?}, using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Validate the Dolibarr settings into an endpoint.
    pub fn endpoint(&self) -> Result<EndpointConfig, ConfigError> {
        EndpointConfig::resolve(
            self.dolibarr.url.as_deref().unwrap_or_default(),
            self.dolibarr.api_key.as_deref().unwrap_or_default(),
        )
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.dolibarr.timeout_secs)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Map level names to `tracing` directives.
///
/// `WARNING` and `CRITICAL` are accepted as aliases for `warn` and `error`.
pub fn normalize_log_level(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        other => other.to_string(),
    }
}
