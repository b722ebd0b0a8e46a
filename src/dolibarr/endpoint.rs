//! Endpoint resolution for the Dolibarr REST API.
//!
//! Turns the raw URL and API key settings into an immutable [`EndpointConfig`]
//! whose base URL always ends with the REST root (`/api/index.php`).

use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Path every Dolibarr REST call is rooted under.
pub const API_ROOT: &str = "/api/index.php";

/// Shortest API key we accept. Dolibarr generates 32-character keys.
pub const MIN_API_KEY_LENGTH: usize = 10;

/// Errors raised while resolving the endpoint configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No base URL was configured.
    #[error("DOLIBARR_URL is required")]
    MissingUrl,

    /// The base URL does not use an HTTP(S) scheme.
    #[error("DOLIBARR_URL must start with http:// or https:// (got '{0}')")]
    InvalidScheme(String),

    /// The base URL could not be parsed.
    #[error("DOLIBARR_URL is not a valid URL: {0}")]
    InvalidUrl(String),

    /// No API key was configured.
    #[error(
        "DOLIBARR_API_KEY is required. Create one in Dolibarr under Home > Setup > API/Web services"
    )]
    MissingApiKey,

    /// The API key is too short to be real.
    #[error("DOLIBARR_API_KEY appears to be too short ({length} characters, expected at least {min})")]
    ApiKeyTooShort { length: usize, min: usize },
}

/// Resolved connection settings for the Dolibarr API.
///
/// Constructed once at startup and shared read-only afterwards.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct EndpointConfig {
    base_url: String,
    #[serde(skip_serializing)]
    api_key: String,
}

impl EndpointConfig {
    /// Validate raw settings and build the endpoint configuration.
    pub fn resolve(raw_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        let trimmed = raw_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingUrl);
        }

        let lower = trimmed.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(ConfigError::InvalidScheme(trimmed.to_string()));
        }

        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::InvalidUrl(format!("'{trimmed}' has no host")));
        }
        let base_url = normalize_base_url(trimmed);

        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let length = api_key.chars().count();
        if length < MIN_API_KEY_LENGTH {
            return Err(ConfigError::ApiKeyTooShort {
                length,
                min: MIN_API_KEY_LENGTH,
            });
        }

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Base URL, ending with [`API_ROOT`].
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The pre-shared API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Join an endpoint segment onto the base URL.
    ///
    /// An empty segment yields the base URL itself.
    pub fn url_for(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Normalize a Dolibarr base URL so it ends with [`API_ROOT`].
///
/// Trailing slashes are stripped. A URL already ending in `/api` only gets
/// `/index.php` appended; anything else gets the full root.
pub fn normalize_base_url(raw: &str) -> String {
    let url = raw.trim().trim_end_matches('/');

    if url.ends_with(API_ROOT) {
        url.to_string()
    } else if url.ends_with("/api") {
        format!("{url}/index.php")
    } else {
        format!("{url}{API_ROOT}")
    }
}
