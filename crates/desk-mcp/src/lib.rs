//! JSON-RPC stdio tool server for trade-desk
//!
//! Exposes the tools of a [`ToolRegistry`](desk_tools::ToolRegistry) over
//! newline-delimited JSON-RPC 2.0. Supported methods are `initialize`,
//! `ping`, `tools/list` and `tools/call`.
//!
//! # Example
//!
//! ```no_run
//! use desk_mcp::ToolServer;
//! use desk_tools::ToolRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ToolRegistry::new());
//! ToolServer::new(registry).serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod protocol;
pub mod server;

pub use error::{McpError, Result};
pub use protocol::{CallToolResult, Content, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::ToolServer;
