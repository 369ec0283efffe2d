//! Protocol-level error taxonomy.

use crate::protocol::JsonRpcError;

/// Errors surfaced by the gateway outside of tool content.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum McpError {
    /// A tool argument is missing or has the wrong type.
    #[error("Invalid arguments for {tool}: {message}")]
    MalformedInput { tool: String, message: String },

    /// The named tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The request body is not JSON, even after unwrapping a JSON string.
    #[error("Parse error: {0}")]
    BodyParse(String),

    /// The message is JSON but not a JSON-RPC request.
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),
}

impl McpError {
    pub fn malformed(tool: &str, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::MalformedInput { .. } | Self::UnknownTool(_) => JsonRpcError::INVALID_PARAMS,
            Self::BodyParse(_) => JsonRpcError::PARSE_ERROR,
            Self::InvalidRequest(_) => JsonRpcError::INVALID_REQUEST,
            Self::MethodNotFound(_) => JsonRpcError::METHOD_NOT_FOUND,
        }
    }

    pub fn to_rpc_error(&self) -> JsonRpcError {
        match self {
            Self::MalformedInput { .. } | Self::UnknownTool(_) => {
                JsonRpcError::invalid_params(self.to_string())
            }
            Self::BodyParse(_) => JsonRpcError::parse_error(self.to_string()),
            Self::InvalidRequest(_) => JsonRpcError::invalid_request(self.to_string()),
            Self::MethodNotFound(method) => JsonRpcError::method_not_found(method),
        }
    }
}

impl From<McpError> for JsonRpcError {
    fn from(err: McpError) -> Self {
        err.to_rpc_error()
    }
}
