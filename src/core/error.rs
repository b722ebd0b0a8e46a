//! Error types and handling for the MCP server.
//!
//! Each layer has its own error enum; this module collects them into the
//! crate-level [`Error`].

use thiserror::Error;

use super::transport::FrontendError;
use crate::dolibarr::ConfigError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing Dolibarr settings.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// MCP front end failed.
    #[error("Transport error: {0}")]
    Frontend(#[from] FrontendError),
}
