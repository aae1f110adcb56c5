use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::jsonrpc::{error_response, parse_message, JsonRpcMessage, JsonRpcResponse, PARSE_ERROR};
use super::router;
use crate::tools::ToolRegistry;

/// Serve newline-delimited JSON-RPC on stdin/stdout until stdin closes.
///
/// Logs go to stderr; stdout carries protocol frames only.
pub async fn serve_stdio(tools: &ToolRegistry) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        if let Some(response) = handle_line(tools, &line).await {
            let mut frame = serde_json::to_string(&response).context("Failed to encode response")?;
            frame.push('\n');
            stdout
                .write_all(frame.as_bytes())
                .await
                .context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
        }
    }

    log::info!("MCP: stdin closed, shutting down");
    Ok(())
}

/// Handle one inbound line. Notifications and blank lines yield no response.
pub async fn handle_line(tools: &ToolRegistry, line: &str) -> Option<JsonRpcResponse> {
    if line.trim().is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("MCP: unparseable message: {}", e);
            return Some(error_response(Value::Null, PARSE_ERROR, "Parse error"));
        }
    };

    let message = match parse_message(&value) {
        Ok(msg) => msg,
        Err(err) => {
            return Some(JsonRpcResponse {
                jsonrpc: "2.0".into(),
                id: value.get("id").cloned().unwrap_or(Value::Null),
                result: None,
                error: Some(err),
            });
        }
    };

    match message {
        JsonRpcMessage::Notification(notif) => {
            if !router::handle_notification(&notif) {
                log::debug!("MCP: notification ignored");
            }
            None
        }
        JsonRpcMessage::Request(req) => {
            log::debug!("MCP: request {} id={}", req.method, req.id);
            Some(router::dispatch_request(tools, &req).await)
        }
    }
}
