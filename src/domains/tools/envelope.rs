//! The uniform result returned from every tool invocation.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Value, json};

use super::error::ToolError;

/// Why an invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The Dolibarr API answered with an error status.
    ApiError,
    /// The request never completed (network, TLS, timeout).
    InternalError,
    /// The tool name is not in the catalog.
    UnknownTool,
    /// The arguments did not satisfy the tool's schema.
    InvalidArguments,
}

/// Outcome of a tool invocation: either data or a failure, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEnvelope {
    Success {
        data: Value,
    },
    Failure {
        kind: FailureKind,
        message: String,
        status: Option<u16>,
    },
}

impl ResultEnvelope {
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn api_error(message: impl Into<String>, status: u16) -> Self {
        Self::Failure {
            kind: FailureKind::ApiError,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// JSON form handed to MCP clients.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success { data } => json!({ "success": true, "data": data }),
            Self::Failure {
                kind,
                message,
                status,
            } => {
                let mut out = json!({ "error": message, "type": kind });
                if let (Some(code), Some(obj)) = (status, out.as_object_mut()) {
                    obj.insert("status_code".to_string(), json!(code));
                }
                out
            }
        }
    }

    /// Convert into an MCP tool result.
    pub fn into_call_tool_result(self) -> CallToolResult {
        let structured = self.to_json();
        let text = serde_json::to_string_pretty(&structured)
            .unwrap_or_else(|_| structured.to_string());

        let mut result = if self.is_success() {
            CallToolResult::success(vec![Content::text(text)])
        } else {
            CallToolResult::error(vec![Content::text(text)])
        };
        result.structured_content = Some(structured);
        result
    }
}

impl From<ToolError> for ResultEnvelope {
    fn from(e: ToolError) -> Self {
        let kind = match e {
            ToolError::UnknownTool(_) => FailureKind::UnknownTool,
            ToolError::MissingArgument(_)
            | ToolError::InvalidArgument { .. }
            | ToolError::UnexpectedArgument(_) => FailureKind::InvalidArguments,
            ToolError::UnsupportedTool(_) => FailureKind::InternalError,
        };
        Self::failure(kind, e.to_string())
    }
}
