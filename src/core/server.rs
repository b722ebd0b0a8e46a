//! MCP Server implementation and lifecycle management.
//!
//! The server exposes the Dolibarr tool catalog. Tool calls are routed by the
//! `ToolRouter` built in `domains/tools/router.rs`, which forwards every call
//! to the shared [`ToolDispatcher`].

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::dolibarr::ReqwestTransport;
use crate::domains::tools::{ToolDispatcher, build_tool_router};

const INSTRUCTIONS: &str = "Tools for the Dolibarr ERP/CRM REST API: users, customers \
(third parties), products, connectivity checks and raw API access.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,

    dispatcher: Arc<ToolDispatcher>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server talking to the configured Dolibarr instance.
    ///
    /// Fails when the URL or API key is missing or invalid.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let endpoint = Arc::new(config.endpoint()?);
        info!("Dolibarr API: {}", endpoint.base_url());

        let dispatcher = ToolDispatcher::new(
            endpoint,
            Arc::new(ReqwestTransport::new()),
            config.timeout(),
        );
        Ok(Self::with_dispatcher(config, Arc::new(dispatcher)))
    }

    /// Create a server around an existing dispatcher.
    pub fn with_dispatcher(config: Config, dispatcher: Arc<ToolDispatcher>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config: Arc::new(config),
            dispatcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<ToolDispatcher> {
        &self.dispatcher
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "annotations": t.annotations
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(&self, name: &str, arguments: &JsonObject) -> CallToolResult {
        self.dispatcher
            .invoke(name, arguments)
            .await
            .into_call_tool_result()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
