//! Stdio MCP server (request loop, method routing).

use std::future::Future;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JSONRPC_VERSION,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, Tool,
};

/// Maximum accepted size of a single request line (1MB).
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Trait for tool execution hosts.
///
/// The server asks the host for its catalog on `tools/list` and forwards every
/// `tools/call`. Failures are reported inside the returned [`CallToolResult`]
/// (`is_error`), never as protocol errors.
pub trait ToolHost: Send + Sync {
    /// Tools exposed to the client.
    fn tools(&self) -> Vec<Tool>;

    /// Execute a tool call.
    fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> impl Future<Output = CallToolResult> + Send;
}

/// An MCP server bound to a tool host.
pub struct Server<H> {
    info: ServerInfo,
    host: H,
}

impl<H: ToolHost> Server<H> {
    pub fn new(name: impl Into<String>, version: impl Into<String>, host: H) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            host,
        }
    }

    /// Get the tool host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Serve over the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, writing responses to
    /// `writer`. Requests are handled one at a time in arrival order.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(server = %self.info.name, "MCP server listening on stdio");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                let json = serde_json::to_string(&response)?;
                writer.write_all(json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a single raw message. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        if line.len() > MAX_MESSAGE_SIZE {
            return Some(JsonRpcResponse::failure(
                None,
                JsonRpcError::new(
                    JsonRpcError::INVALID_REQUEST,
                    format!("message too large: {} bytes (max {MAX_MESSAGE_SIZE})", line.len()),
                ),
            ));
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable message");
                return Some(JsonRpcResponse::failure(None, JsonRpcError::parse_error(e)));
            }
        };

        self.handle_request(request).await
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            tracing::warn!(jsonrpc = %request.jsonrpc, "unsupported JSON-RPC version");
            // Notifications get no reply, not even an error.
            return request.id.map(|id| {
                JsonRpcResponse::failure(
                    Some(id),
                    JsonRpcError::invalid_request(format!(
                        "jsonrpc must be \"{JSONRPC_VERSION}\""
                    )),
                )
            });
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        let id = request.id.clone();
        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(Value::Object(Default::default())),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(p) => serde_json::from_value(p).map_err(JsonRpcError::invalid_params)?,
            None => InitializeParams::default(),
        };

        let result = InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities::default(),
            server_info: self.info.clone(),
        };
        to_result(&result)
    }

    fn list_tools(&self) -> std::result::Result<Value, JsonRpcError> {
        to_result(&ListToolsResult {
            tools: self.host.tools(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("missing params"))
            .and_then(|p| serde_json::from_value(p).map_err(JsonRpcError::invalid_params))?;

        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Default::default()));
        let result = self.host.call_tool(&params.name, arguments).await;
        to_result(&result)
    }
}

fn to_result(value: &impl serde::Serialize) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, e.to_string()))
}
