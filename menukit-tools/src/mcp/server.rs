//! MCP server handler serving a menu's tool registry

use menukit::{DispatchError, HandlerContext, JsonObject, Surface, ToolIdentity, ToolRegistry};
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Version reported in the MCP handshake
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `rmcp` handler exposing every tool of a [`ToolRegistry`]
///
/// Cloning is cheap; the streamable HTTP transport creates one clone per session.
#[derive(Clone)]
pub struct MenuServer {
    registry: Arc<ToolRegistry>,
}

impl MenuServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Tool descriptors for `tools/list`, in registry order
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.identities().map(to_mcp_tool).collect()
    }

    /// Execute `name` with `arguments`
    ///
    /// Unknown tools are a protocol error. Every dispatch failure becomes an
    /// error result carrying the failure's message; handler failures carry
    /// only the fixed generic message.
    pub async fn call(
        &self,
        name: &str,
        arguments: JsonObject,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let tool = self.registry.get(name).ok_or_else(|| {
            tracing::warn!("Unknown tool requested: {}", name);
            McpError::invalid_params(format!("Unknown tool: {name}"), None)
        })?;

        let ctx = HandlerContext::with_cancellation(Surface::Mcp, cancel);
        match tool.invoke(ctx, &arguments).await {
            Ok(output) => Ok(CallToolResult::success(vec![Content::text(
                output.render_compact(),
            )])),
            Err(err) => {
                if !matches!(err, DispatchError::HandlerFailure) {
                    tracing::debug!("Rejected call to {}: {}", name, err);
                }
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }
}

fn to_mcp_tool(identity: &ToolIdentity) -> Tool {
    Tool::new(
        identity.name.clone(),
        identity.description.clone(),
        Arc::new(identity.input_schema()),
    )
}

impl ServerHandler for MenuServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("call_tool: {}", request.name);
        let arguments = request.arguments.unwrap_or_default();
        self.call(&request.name, arguments, context.ct.clone()).await
    }

    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = self.registry.root_name();
        info.server_info.version = SERVER_VERSION.to_string();
        let instructions = self.registry.server_description();
        info.instructions = (!instructions.is_empty()).then_some(instructions);
        info
    }
}
