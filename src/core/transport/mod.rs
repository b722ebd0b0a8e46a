//! Front-end transports for the MCP server.
//!
//! - **STDIO**: standard input/output (default) - feature: `stdio`
//! - **HTTP**: JSON-RPC over POST requests - feature: `http`
//!
//! These carry MCP traffic from clients. Outbound calls to Dolibarr live in
//! [`crate::dolibarr`].

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{FrontendError, FrontendResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
