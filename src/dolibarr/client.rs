//! Outbound HTTP transport for the Dolibarr API.
//!
//! The [`Transport`] trait is the only suspension point of a tool call.
//! [`ReqwestTransport`] is the production implementation; tests swap in
//! their own.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use super::request::RequestDescriptor;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Broad cause of a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connection,
    Tls,
    Timeout,
    Other,
}

/// The request never produced an HTTP response.
///
/// `detail` is sanitized and meant for logs only; it never reaches the caller.
#[derive(Debug, Clone, Error)]
#[error("{kind:?} transport failure: {detail}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn timeout() -> Self {
        Self::new(TransportErrorKind::Timeout, "request timed out")
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            TransportErrorKind::Timeout
        } else if mentions_tls(&e) {
            TransportErrorKind::Tls
        } else if e.is_connect() {
            TransportErrorKind::Connection
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, sanitize_reqwest_error(&e))
    }
}

/// Executes request descriptors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        debug!(method = %request.method, url = %request.display_url(), "Sending Dolibarr request");

        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .timeout(timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = TransportError::from(e);
            warn!(kind = ?err.kind, "Dolibarr request failed: {}", err.detail);
            err
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::from)?;
        debug!(status, bytes = body.len(), "Dolibarr response received");

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

/// Render a reqwest error without the request URL.
fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(url) = e.url() {
        msg = msg.replace(url.as_str(), "<dolibarr-url>");
    }
    msg
}

fn mentions_tls(e: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = e.source();
    while let Some(err) = source {
        let text = err.to_string().to_ascii_lowercase();
        if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
            return true;
        }
        source = err.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_server_error() {
        assert!(RawResponse::new(503, "").is_server_error());
        assert!(!RawResponse::new(404, "").is_server_error());
    }

    #[tokio::test]
    async fn test_connection_refused_is_classified() {
        use crate::dolibarr::{EndpointConfig, HttpMethod};

        // Port 9 (discard) is closed on loopback in any sane test environment.
        let endpoint = EndpointConfig::resolve("http://127.0.0.1:9", "0123456789abcdef").unwrap();
        let request = RequestDescriptor::new(HttpMethod::Get, "status", &endpoint);

        let err = ReqwestTransport::new()
            .execute(&request, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind, TransportErrorKind::Connection);
        assert!(!err.detail.contains("127.0.0.1:9/api"));
    }
}
