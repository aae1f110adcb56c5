use serde_json::{json, Value};

use super::jsonrpc::{
    error_response, error_response_with_data, success_response, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, METHOD_NOT_FOUND,
};
use crate::tools::ToolRegistry;

const PROTOCOL_VERSION: &str = "2025-03-26";

/// Dispatch a JSON-RPC request to the appropriate handler.
pub async fn dispatch_request(tools: &ToolRegistry, request: &JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return error_response(
            request.id.clone(),
            INVALID_REQUEST,
            format!("Invalid Request: unsupported jsonrpc version {:?}", request.jsonrpc),
        );
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(request.id.clone(), request.params.as_ref()),
        "ping" => success_response(request.id.clone(), json!({})),
        "tools/list" => success_response(request.id.clone(), json!({ "tools": tools.definitions() })),
        "tools/call" => handle_tools_call(tools, request.id.clone(), request.params.as_ref()).await,
        _ => error_response(
            request.id.clone(),
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// Handle a JSON-RPC notification (no response expected).
/// Returns false when the notification was dropped.
pub fn handle_notification(notification: &JsonRpcNotification) -> bool {
    if notification.jsonrpc != "2.0" {
        log::warn!(
            "MCP: dropping notification {} with jsonrpc version {:?}",
            notification.method,
            notification.jsonrpc
        );
        return false;
    }

    match notification.method.as_str() {
        "notifications/initialized" => log::debug!("MCP: client initialized"),
        "notifications/cancelled" => {
            // Calls run to completion; there is nothing to cancel.
            log::debug!("MCP: cancellation ignored: {:?}", notification.params);
        }
        other => log::debug!("MCP: unknown notification {}", other),
    }
    true
}

fn handle_initialize(id: Value, params: Option<&Value>) -> JsonRpcResponse {
    let client_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    log::info!(
        "MCP: initialize (client protocol {}, responding with {})",
        client_version,
        PROTOCOL_VERSION
    );

    success_response(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "cosense-mcp",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

async fn handle_tools_call(tools: &ToolRegistry, id: Value, params: Option<&Value>) -> JsonRpcResponse {
    let name = params
        .and_then(|p| p.get("name"))
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let arguments = params
        .and_then(|p| p.get("arguments"))
        .cloned()
        .unwrap_or_else(|| json!({}));

    match tools.dispatch(name, &arguments).await {
        Ok(text) => success_response(
            id,
            json!({
                "content": [
                    {
                        "type": "text",
                        "text": text
                    }
                ]
            }),
        ),
        Err(e) => error_response_with_data(
            id,
            e.rpc_code(),
            e.to_string(),
            Some(json!({ "kind": e.kind() })),
        ),
    }
}
