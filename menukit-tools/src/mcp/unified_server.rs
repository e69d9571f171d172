//! Unified server start-up for stdio and HTTP transports
//!
//! Stdio mode speaks MCP over stdin/stdout until the client disconnects.
//! HTTP mode serves MCP at `/mcp`, a health probe at `/health` and the plain
//! tool endpoints under `/tools` from a single listener.

use crate::error::{Result, ServerError};
use crate::http::tool_router;
use crate::mcp::server::MenuServer;
use axum::routing::get;
use axum::Json;
use menukit::ToolRegistry;
use menukit_common::Pretty;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// How long open connections may take to drain on shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Health check body
fn health_body(service: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "service": service
    })
}

/// MCP server transport mode configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum McpServerMode {
    /// Standard input/output transport
    Stdio,
    /// HTTP transport; `None` picks a random free port
    Http { port: Option<u16> },
}

/// Connection information returned after server startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerInfo {
    pub mode: McpServerMode,
    /// `stdio`, or the full URL of the `/mcp` endpoint
    pub connection_url: String,
    /// Actual bound port (HTTP mode)
    pub port: Option<u16>,
}

/// Handle for a running server
#[derive(Debug)]
pub struct McpServerHandle {
    info: McpServerInfo,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl McpServerHandle {
    fn new(info: McpServerInfo, shutdown_tx: oneshot::Sender<()>, task: JoinHandle<()>) -> Self {
        Self {
            info,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub fn info(&self) -> &McpServerInfo {
        &self.info
    }

    pub fn port(&self) -> Option<u16> {
        self.info.port
    }

    pub fn url(&self) -> &str {
        &self.info.connection_url
    }

    /// Base URL of the HTTP listener, without the `/mcp` path
    pub fn base_url(&self) -> Option<String> {
        self.info
            .connection_url
            .strip_suffix("/mcp")
            .map(str::to_string)
    }

    /// Wait for the server to stop on its own
    ///
    /// In stdio mode this is when the client disconnects.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("MCP server task failed: {}", e);
            }
        }
    }

    /// Signal shutdown and wait for the server task to finish
    ///
    /// Connections still open after a grace period are dropped.
    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            if tx.send(()).is_err() {
                tracing::warn!("Server shutdown signal receiver already dropped");
            }
        }
        if let Some(task) = self.task.take() {
            let abort = task.abort_handle();
            if tokio::time::timeout(SHUTDOWN_GRACE, task).await.is_err() {
                tracing::warn!("Server did not stop within {:?}, aborting", SHUTDOWN_GRACE);
                abort.abort();
            }
        }
        Ok(())
    }
}

/// Start a server for `registry` in the given mode
///
/// `host` is the interface the HTTP listener binds to; it is ignored for stdio.
pub async fn start_mcp_server(
    mode: McpServerMode,
    registry: Arc<ToolRegistry>,
    host: &str,
) -> Result<McpServerHandle> {
    let names: Vec<String> = registry.identities().map(|i| i.name.clone()).collect();
    tracing::debug!("Serving {} tools: {}", names.len(), Pretty(&names));

    match mode {
        McpServerMode::Stdio => start_stdio_server(registry).await,
        McpServerMode::Http { port } => start_http_server(registry, host, port).await,
    }
}

async fn start_stdio_server(registry: Arc<ToolRegistry>) -> Result<McpServerHandle> {
    let server = MenuServer::new(registry);
    tracing::info!("Starting MCP server in stdio mode");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        match serve_server(server, stdio()).await {
            Ok(running_service) => {
                tracing::info!("MCP stdio server started successfully");
                tokio::select! {
                    result = running_service.waiting() => match result {
                        Ok(quit_reason) => {
                            tracing::info!("MCP stdio server completed: {:?}", quit_reason);
                        }
                        Err(e) => {
                            tracing::error!("MCP stdio server task error: {}", e);
                        }
                    },
                    _ = shutdown_rx => {
                        tracing::info!("MCP stdio server shutting down");
                    }
                }
            }
            Err(e) => {
                tracing::error!("Failed to start stdio server: {}", e);
            }
        }
    });

    let info = McpServerInfo {
        mode: McpServerMode::Stdio,
        connection_url: "stdio".to_string(),
        port: None,
    };

    Ok(McpServerHandle::new(info, shutdown_tx, task))
}

async fn start_http_server(
    registry: Arc<ToolRegistry>,
    host: &str,
    port: Option<u16>,
) -> Result<McpServerHandle> {
    let bind_addr = format!("{}:{}", host, port.unwrap_or(0));
    tracing::debug!("Binding HTTP server to {}", bind_addr);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;
    let actual_port = listener
        .local_addr()
        .map_err(ServerError::LocalAddress)?
        .port();

    let service_name = registry.root_name();
    let server = MenuServer::new(registry.clone());
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = tool_router(registry)
        .nest_service("/mcp", service)
        .route(
            "/health",
            get(move || {
                let body = health_body(&service_name);
                async move { Json(body) }
            }),
        )
        .layer(TraceLayer::new_for_http());

    let connection_url = format!("http://{}:{}/mcp", host, actual_port);
    tracing::info!("HTTP MCP server ready on {}", connection_url);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let shutdown = async {
            shutdown_rx.await.ok();
        };
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::error!("HTTP server error: {}", e);
        }
        tracing::info!("HTTP MCP server stopped");
    });

    let info = McpServerInfo {
        mode: McpServerMode::Http {
            port: Some(actual_port),
        },
        connection_url,
        port: Some(actual_port),
    };

    Ok(McpServerHandle::new(info, shutdown_tx, task))
}
