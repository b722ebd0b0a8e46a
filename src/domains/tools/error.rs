//! Tool-specific error types.

use thiserror::Error;

/// Errors raised while validating or translating a tool call.
///
/// None of these reach the network: they are resolved before any request
/// is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    /// The requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument is absent.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// An argument has the wrong type or an out-of-range value.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// An argument the tool does not declare.
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// The tool passed validation but has no translation rule.
    #[error("Unsupported tool: {0}")]
    UnsupportedTool(String),
}

impl ToolError {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn unexpected_argument(name: impl Into<String>) -> Self {
        Self::UnexpectedArgument(name.into())
    }

    pub fn unsupported_tool(name: impl Into<String>) -> Self {
        Self::UnsupportedTool(name.into())
    }
}
