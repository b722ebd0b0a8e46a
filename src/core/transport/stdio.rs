//! STDIO transport: the default MCP mode.
//!
//! stdout carries the protocol; logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{FrontendError, FrontendResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    pub async fn run(server: McpServer) -> FrontendResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| FrontendError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| FrontendError::ServiceError(e.to_string()))?;

        info!("STDIO session closed");
        Ok(())
    }
}
