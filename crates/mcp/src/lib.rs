//! MCP (Model Context Protocol) server library.
//!
//! This crate serves a fixed set of tools to an MCP client over stdio using
//! newline-delimited JSON-RPC 2.0. The tools themselves live behind the
//! [`ToolHost`] trait; this crate only owns the wire format and the request
//! loop.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{CallToolResult, Server, Tool, ToolHost};
//! use serde_json::{Value, json};
//!
//! struct Echo;
//!
//! impl ToolHost for Echo {
//!     fn tools(&self) -> Vec<Tool> {
//!         vec![Tool {
//!             name: "echo".to_string(),
//!             description: Some("Echo the arguments back".to_string()),
//!             input_schema: json!({"type": "object"}),
//!         }]
//!     }
//!
//!     async fn call_tool(&self, _name: &str, arguments: Value) -> CallToolResult {
//!         CallToolResult::text(arguments.to_string())
//!     }
//! }
//!
//! # async fn example() -> mcp::Result<()> {
//! let server = Server::new("echo", "0.1.0", Echo);
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod protocol;
mod server;

pub use error::{Error, Result};
pub use protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JSONRPC_VERSION,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, PROTOCOL_VERSION, RequestId,
    ServerCapabilities, ServerInfo, Tool, ToolContent, ToolsCapability,
};
pub use server::{MAX_MESSAGE_SIZE, Server, ToolHost};
