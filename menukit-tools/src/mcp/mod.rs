//! Model Context Protocol (MCP) surface
//!
//! [`MenuServer`] answers `tools/list` and `tools/call` from a
//! [`ToolRegistry`](menukit::ToolRegistry). [`start_mcp_server`] runs it over
//! stdio, or over HTTP next to the plain tool endpoints.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use menukit::{Menu, MenuOption, Output};
//! use menukit_tools::mcp::{start_mcp_server, McpServerMode};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = Menu::new()
//!     .title("Ping")
//!     .option(MenuOption::new("Ping", "ping"))
//!     .handler(|_ctx, _value, _fields| async { Ok(Output::from("pong")) })
//!     .to_registry()?;
//!
//! let mut handle =
//!     start_mcp_server(McpServerMode::Http { port: None }, Arc::new(registry), "127.0.0.1")
//!         .await?;
//! println!("MCP endpoint: {}", handle.url());
//! handle.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod server;
pub mod unified_server;

pub use server::MenuServer;
pub use unified_server::{start_mcp_server, McpServerHandle, McpServerInfo, McpServerMode};
