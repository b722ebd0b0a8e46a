//! Status probe for `test_connection` and `get_status`.
//!
//! Dolibarr instances differ in which endpoints a key may read, so the probe
//! tries a short list of cheap GET requests in order and reports the first one
//! that reaches the API without a server error.

use std::time::Duration;

use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use super::classifier::{decode_body, error_message, transport_failure};
use super::envelope::{FailureKind, ResultEnvelope};
use crate::dolibarr::{
    EndpointConfig, HttpMethod, RawResponse, RequestDescriptor, Transport, TransportError,
};

/// Message attached to a successful `test_connection`.
pub const CONNECTION_OK_MESSAGE: &str = "API connection working";

const UNKNOWN_VERSION: &str = "unknown";

/// One named probe request.
#[derive(Debug, Clone)]
pub struct Probe {
    pub name: &'static str,
    pub request: RequestDescriptor,
}

/// Ordered probes with early exit.
#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub probes: Vec<Probe>,
    /// Extra `message` field for the synthesized result.
    pub message: Option<&'static str>,
}

impl ProbePlan {
    /// `status`, then `users?limit=1`, then the bare base URL.
    pub fn standard(endpoint: &EndpointConfig) -> Self {
        Self {
            probes: vec![
                Probe {
                    name: "status",
                    request: RequestDescriptor::new(HttpMethod::Get, "status", endpoint),
                },
                Probe {
                    name: "users",
                    request: RequestDescriptor::new(HttpMethod::Get, "users", endpoint)
                        .with_query("limit", 1),
                },
                Probe {
                    name: "base",
                    request: RequestDescriptor::new(HttpMethod::Get, "", endpoint),
                },
            ],
            message: None,
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// Run the probes until one answers without a 5xx.
    pub async fn run(&self, transport: &dyn Transport, timeout: Duration) -> ResultEnvelope {
        let mut last_server_error: Option<RawResponse> = None;
        let mut last_transport_error: Option<TransportError> = None;

        for probe in &self.probes {
            debug!("Probing {} ({})", probe.name, probe.request.display_url());
            match transport.execute(&probe.request, timeout).await {
                Ok(response) if response.is_server_error() => {
                    warn!("Probe {} returned HTTP {}", probe.name, response.status);
                    last_server_error = Some(response);
                }
                Ok(response) => return ResultEnvelope::success(self.synthesize(probe, &response)),
                Err(e) => {
                    warn!("Probe {} failed: {}", probe.name, e);
                    last_transport_error = Some(e);
                }
            }
        }

        match (last_server_error, last_transport_error) {
            (Some(response), _) => ResultEnvelope::api_error(
                error_message(response.status, &response.body),
                response.status,
            ),
            (None, Some(e)) => transport_failure(&e),
            (None, None) => {
                ResultEnvelope::failure(FailureKind::InternalError, "No status probe configured")
            }
        }
    }

    fn synthesize(&self, probe: &Probe, response: &RawResponse) -> Value {
        let body = (!response.body.is_empty()).then(|| decode_body(&response.body));
        let version = body
            .as_ref()
            .and_then(|b| b.pointer("/success/dolibarr_version"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_VERSION);

        let mut out = Map::new();
        out.insert("success".into(), json!(1));
        out.insert("probe".into(), json!(probe.name));
        out.insert("status_code".into(), json!(response.status));
        out.insert("dolibarr_version".into(), json!(version));
        if let Some(message) = self.message {
            out.insert("message".into(), json!(message));
        }
        if (200..300).contains(&response.status) {
            out.insert("data".into(), body.unwrap_or(Value::Null));
        }
        Value::Object(out)
    }
}
