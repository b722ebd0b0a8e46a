//! Dolibarr MCP Server Library
//!
//! Exposes Dolibarr ERP/CRM REST operations as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **dolibarr**: endpoint resolution, request descriptors and the outbound HTTP transport
//! - **domains::tools**: tool catalog, validation, translation, classification and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use dolibarr_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod dolibarr;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{ResultEnvelope, ToolDispatcher};
