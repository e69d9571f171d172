//! # menukit tools
//!
//! Network surfaces for menukit menus:
//!
//! - **MCP**: an `rmcp` server handler over stdio or streamable HTTP
//! - **HTTP**: plain JSON endpoints to list, describe and run tools
//!
//! Both serve from the same [`ToolRegistry`](menukit::ToolRegistry), so a
//! tool validates and sanitizes identically whichever way it is called.

pub mod error;
pub mod http;
pub mod mcp;

pub use error::{Result, ServerError};
pub use http::{tool_router, ApiError, ToolDocument, ToolListing};
pub use mcp::{start_mcp_server, MenuServer, McpServerHandle, McpServerInfo, McpServerMode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
