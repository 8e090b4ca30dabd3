//! Newline-delimited JSON-RPC tool server
//!
//! Reads one request per line and writes one response per line. Logging goes
//! to stderr, so stdout carries protocol traffic only.

use crate::error::Result;
use crate::protocol::{
    CallToolResult, JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    PROTOCOL_VERSION,
};
use desk_core::Error;
use desk_tools::ToolRegistry;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Serves the tools of one registry
pub struct ToolServer {
    registry: Arc<ToolRegistry>,
}

const SERVER_NAME: &str = "trade-desk";

impl ToolServer {
    /// Create a server over an explicitly constructed registry
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw line, answering malformed JSON with a parse error
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Unparseable request: {}", e);
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ))
            }
        }
    }

    /// Handle one request, returning `None` for notifications
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!("Ignoring notification: {}", request.method);
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_request(format!("unsupported version '{}'", request.jsonrpc)),
            ));
        }

        debug!("Handling request: {}", request.method);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    async fn call_tool(&self, params: Value) -> std::result::Result<Value, JsonRpcError> {
        let params: CallParams = serde_json::from_value(params)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")))?;
        let arguments = params.arguments.unwrap_or_else(|| json!({}));

        let result = match self.registry.call(&params.name, arguments).await {
            Ok(output) => CallToolResult::success(output),
            Err(Error::UnknownTool(name)) => {
                return Err(JsonRpcError::invalid_params(format!("Unknown tool: {name}")));
            }
            Err(e) => CallToolResult::error(e.to_string()),
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal(e.to_string()))
    }

    /// Serve requests from `reader` until end of input
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Tool server started with {} tools", self.registry.len());
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    warn!("Request is not valid UTF-8: {}", e);
                    let response = JsonRpcResponse::failure(
                        Value::Null,
                        JsonRpcError::parse_error(format!("request is not valid UTF-8: {e}")),
                    );
                    write_response(&mut writer, &response).await?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                write_response(&mut writer, &response).await?;
            }
        }

        info!("Input closed, tool server stopping");
        Ok(())
    }

    /// Serve on the process's stdin and stdout
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut out = serde_json::to_string(response)?;
    out.push('\n');
    writer.write_all(out.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
