use thiserror::Error;

use crate::mcp::jsonrpc::{INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND};

/// Failure of a single tool call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Invalid argument `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Project \"{0}\" is not in the allowed list.")]
    UnauthorizedCollection(String),

    #[error("Page \"{title}\" not found in project \"{project}\".")]
    NotFound { project: String, title: String },

    #[error("Page \"{title}\" already exists in project \"{project}\".")]
    AlreadyExists { project: String, title: String },

    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("Unknown tool: {0}")]
    UnknownOperation(String),
}

impl ToolError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ToolError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Wrap an upstream failure, keeping the whole context chain.
    pub fn transport(operation: &'static str, err: anyhow::Error) -> Self {
        ToolError::Transport {
            operation,
            message: format!("{:#}", err),
        }
    }

    /// Stable machine-readable name, sent as the JSON-RPC error `data.kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Validation { .. } => "validation_error",
            ToolError::UnauthorizedCollection(_) => "unauthorized_collection",
            ToolError::NotFound { .. } => "not_found",
            ToolError::AlreadyExists { .. } => "already_exists",
            ToolError::Transport { .. } => "transport_error",
            ToolError::UnknownOperation(_) => "unknown_operation",
        }
    }

    /// JSON-RPC error code reported for this failure on `tools/call`.
    pub fn rpc_code(&self) -> i64 {
        match self {
            ToolError::Validation { .. } | ToolError::UnauthorizedCollection(_) => INVALID_PARAMS,
            ToolError::NotFound { .. } | ToolError::AlreadyExists { .. } => INVALID_REQUEST,
            ToolError::Transport { .. } => INTERNAL_ERROR,
            ToolError::UnknownOperation(_) => METHOD_NOT_FOUND,
        }
    }
}
