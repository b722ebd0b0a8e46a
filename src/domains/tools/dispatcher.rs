//! Tool dispatcher: validate, translate, execute, classify.

use std::sync::Arc;
use std::time::Duration;

use rmcp::model::JsonObject;
use tracing::{debug, info, instrument, warn};

use super::classifier::classify;
use super::descriptor::ToolDescriptor;
use super::envelope::ResultEnvelope;
use super::registry::ToolRegistry;
use super::translator::{RequestTranslator, Translation};
use crate::dolibarr::{DEFAULT_TIMEOUT_SECS, EndpointConfig, ReqwestTransport, Transport};

/// Single entry point for tool invocations.
///
/// Every call returns a [`ResultEnvelope`]; caller errors are reported
/// without touching the network.
pub struct ToolDispatcher {
    registry: ToolRegistry,
    translator: RequestTranslator,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl ToolDispatcher {
    pub fn new(
        endpoint: Arc<EndpointConfig>,
        transport: Arc<dyn Transport>,
        timeout: Duration,
    ) -> Self {
        Self {
            registry: ToolRegistry::new(),
            translator: RequestTranslator::new(endpoint),
            transport,
            timeout,
        }
    }

    /// Dispatcher backed by the reqwest transport with the default timeout.
    pub fn with_default_transport(endpoint: Arc<EndpointConfig>) -> Self {
        Self::new(
            endpoint,
            Arc::new(ReqwestTransport::new()),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Catalog in registration order.
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        self.registry.list_tools()
    }

    /// Invoke a tool by name.
    #[instrument(skip(self, args), fields(tool = %name))]
    pub async fn invoke(&self, name: &str, args: &JsonObject) -> ResultEnvelope {
        info!("Tool call: {}", name);

        if let Err(e) = self.registry.validate(name, args) {
            warn!("Rejected call to {}: {}", name, e);
            return e.into();
        }

        let translation = match self.translator.translate(name, args) {
            Ok(t) => t,
            Err(e) => {
                warn!("Could not translate {}: {}", name, e);
                return e.into();
            }
        };

        let envelope = match translation {
            Translation::Request(request) => {
                debug!("{} {}", request.method, request.display_url());
                let outcome = self.transport.execute(&request, self.timeout).await;
                classify(outcome, request.shape)
            }
            Translation::Probe(plan) => plan.run(self.transport.as_ref(), self.timeout).await,
        };

        if let ResultEnvelope::Failure { kind, message, .. } = &envelope {
            warn!("Tool {} failed ({:?}): {}", name, kind, message);
        }
        envelope
    }
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher")
            .field("tools", &self.registry.list_tools().len())
            .field("endpoint", self.translator.endpoint())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dolibarr::{RawResponse, RequestDescriptor, TransportError};
    use crate::domains::tools::envelope::FailureKind;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Records requests and answers with a fixed outcome.
    struct Recording {
        outcome: Result<RawResponse, TransportError>,
        requests: Mutex<Vec<RequestDescriptor>>,
    }

    impl Recording {
        fn new(outcome: Result<RawResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<RequestDescriptor> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for Recording {
        async fn execute(
            &self,
            request: &RequestDescriptor,
            _timeout: Duration,
        ) -> Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn dispatcher(transport: Arc<Recording>) -> ToolDispatcher {
        let endpoint = EndpointConfig::resolve("https://erp.example.com", "0123456789abcdef").unwrap();
        ToolDispatcher::new(Arc::new(endpoint), transport, Duration::from_secs(5))
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_request() {
        let transport = Recording::new(Ok(RawResponse::new(200, "[]")));
        let env = dispatcher(transport.clone())
            .invoke("frobnicate", &JsonObject::new())
            .await;
        assert_eq!(env.failure_kind(), Some(FailureKind::UnknownTool));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_argument_makes_no_request() {
        let transport = Recording::new(Ok(RawResponse::new(200, "{}")));
        let env = dispatcher(transport.clone())
            .invoke("get_user_by_id", &JsonObject::new())
            .await;
        assert_eq!(env.failure_kind(), Some(FailureKind::InvalidArguments));
        assert!(env.to_json()["error"].as_str().unwrap().contains("user_id"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_round_trip() {
        let transport = Recording::new(Ok(RawResponse::new(200, r#"[{"id": "1"}]"#)));
        let env = dispatcher(transport.clone())
            .invoke("get_customers", &args(json!({"limit": 10})))
            .await;
        assert_eq!(env.data(), Some(&json!([{"id": "1"}])));

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, "thirdparties");
        assert_eq!(sent[0].query, vec![("limit".to_string(), "10".to_string())]);
    }

    #[tokio::test]
    async fn test_api_error() {
        let transport = Recording::new(Ok(RawResponse::new(
            401,
            r#"{"error": {"code": 401, "message": "Bad token"}}"#,
        )));
        let env = dispatcher(transport).invoke("get_users", &JsonObject::new()).await;
        assert_eq!(
            env.to_json(),
            json!({"error": "Bad token", "type": "api_error", "status_code": 401})
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        let transport = Recording::new(Err(TransportError::timeout()));
        let env = dispatcher(transport)
            .invoke("get_product_by_id", &args(json!({"product_id": 3})))
            .await;
        assert_eq!(env.failure_kind(), Some(FailureKind::InternalError));
        assert!(env.to_json()["error"].as_str().unwrap().contains("Timeout"));
    }

    #[tokio::test]
    async fn test_status_probe_through_dispatcher() {
        let transport = Recording::new(Ok(RawResponse::new(
            200,
            r#"{"success": {"dolibarr_version": "19.0.0"}}"#,
        )));
        let env = dispatcher(transport.clone())
            .invoke("test_connection", &JsonObject::new())
            .await;
        let data = env.data().unwrap();
        assert_eq!(data["message"], "API connection working");
        assert_eq!(data["dolibarr_version"], "19.0.0");
        assert_eq!(transport.requests().len(), 1);
    }
}
