//! In-process mock of the Dolibarr REST API.

#![allow(dead_code)]

use anyhow::Context as _;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dolibarr_mcp_server::ToolDispatcher;
use dolibarr_mcp_server::dolibarr::{EndpointConfig, ReqwestTransport};

pub const API_KEY: &str = "test-api-key-0123";

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    /// Path below `/api/index.php`.
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    seen: Arc<Mutex<Vec<Recorded>>>,
}

/// A running mock server.
pub struct MockDolibarr {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl MockDolibarr {
    pub async fn start() -> anyhow::Result<Self> {
        let state = MockState::default();
        let seen = state.seen.clone();
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock listener")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            seen,
        })
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Dispatcher pointed at this mock, using the real reqwest transport.
    pub fn dispatcher(&self, api_key: &str, timeout: Duration) -> anyhow::Result<ToolDispatcher> {
        let endpoint = EndpointConfig::resolve(&self.base_url, api_key)?;
        Ok(ToolDispatcher::new(
            Arc::new(endpoint),
            Arc::new(ReqwestTransport::new()),
            timeout,
        ))
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/api/index.php")
        .unwrap_or(uri.path())
        .trim_start_matches('/')
        .to_string();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        api_key: header("DOLAPIKEY"),
        user_agent: header("user-agent"),
        body: serde_json::from_slice(&body).ok(),
    };
    if let Ok(mut seen) = state.seen.lock() {
        seen.push(recorded.clone());
    }

    if recorded.api_key.as_deref() != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"error": {"code": 401, "message": "Bad token"}})),
        )
            .into_response();
    }

    match (method, path.as_str()) {
        // Older instances answer the status endpoint with a server error.
        (Method::GET, "status") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        (Method::GET, "users") => {
            axum::Json(json!([{"id": "1", "login": "admin"}])).into_response()
        }
        (Method::GET, "thirdparties") => axum::Json(json!({"not": "a list"})).into_response(),
        (Method::POST, "thirdparties") => axum::Json(json!(42)).into_response(),
        (Method::PUT, "products/7") => axum::Json(json!({"id": 7})).into_response(),
        (Method::GET, "products/9") => {
            tokio::time::sleep(Duration::from_millis(500)).await;
            axum::Json(json!({"id": 9})).into_response()
        }
        (Method::GET, "invoices") => "plain text listing".into_response(),
        (Method::POST, "invoices") => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({"errors": ["socid is mandatory", "date is mandatory"]})),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, "not here").into_response(),
    }
}
