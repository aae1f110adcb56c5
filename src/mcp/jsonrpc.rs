use serde::{Deserialize, Serialize};
use serde_json::Value;

// JSON-RPC 2.0 error codes
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

#[derive(Debug, Serialize, Clone)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize, Clone)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_REQUEST,
            message: message.into(),
            data: None,
        }
    }
}

/// Parse a JSON value into a JsonRpcMessage.
/// Presence of "id" field distinguishes Request from Notification.
pub fn parse_message(body: &Value) -> Result<JsonRpcMessage, JsonRpcError> {
    let obj = body
        .as_object()
        .ok_or_else(|| JsonRpcError::invalid_request("Invalid Request: expected JSON object"))?;

    if !obj.contains_key("method") {
        return Err(JsonRpcError::invalid_request(
            "Invalid Request: missing method field",
        ));
    }

    // An explicit null id still makes a Request.
    if obj.contains_key("id") {
        serde_json::from_value::<JsonRpcRequest>(body.clone())
            .map(JsonRpcMessage::Request)
            .map_err(|e| JsonRpcError::invalid_request(format!("Invalid Request: {}", e)))
    } else {
        serde_json::from_value::<JsonRpcNotification>(body.clone())
            .map(JsonRpcMessage::Notification)
            .map_err(|e| JsonRpcError::invalid_request(format!("Invalid Request: {}", e)))
    }
}

/// Create a success response with the given id and result.
pub fn success_response(id: Value, result: Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id,
        result: Some(result),
        error: None,
    }
}

/// Create an error response with the given id, code, and message.
pub fn error_response(id: Value, code: i64, message: impl Into<String>) -> JsonRpcResponse {
    error_response_with_data(id, code, message, None)
}

pub fn error_response_with_data(
    id: Value,
    code: i64,
    message: impl Into<String>,
    data: Option<Value>,
) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".into(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.into(),
            data,
        }),
    }
}
