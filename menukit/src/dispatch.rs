//! Handler invocation shared by every surface
//!
//! # Architecture Overview
//!
//! Surfaces never see a [`Menu`](crate::Menu) directly. Projection turns each
//! exposed option into a [`MenuTool`], the one narrow interface adapters
//! depend on:
//!
//! 1. `identity()` gives the name and schema to advertise
//! 2. `invoke()` resolves raw input and runs the handler
//!
//! The option's value type is erased behind the trait object, so one registry
//! of `Arc<dyn MenuTool>` serves the CLI, HTTP and MCP adapters alike.
//!
//! # Invocation sequence
//!
//! Every call resolves the raw input against the option's fields; a
//! validation failure is returned without running the handler. A handler error
//! becomes [`DispatchError::HandlerFailure`], whose text is fixed, so nothing
//! the handler produced on failure reaches a caller.

use crate::error::DispatchError;
use crate::field::Field;
use crate::output::Output;
use crate::resolve::{parse_arguments, resolve_fields, FieldMap, JsonObject};
use crate::schema::ToolIdentity;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Which surface an invocation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Cli,
    Http,
    Mcp,
    Interactive,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Surface::Cli => "cli",
            Surface::Http => "http",
            Surface::Mcp => "mcp",
            Surface::Interactive => "interactive",
        };
        f.write_str(name)
    }
}

/// Per-invocation context handed to the handler
///
/// The cancellation token is passed through untouched; only the handler and
/// the surface that created it decide what cancellation means.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    surface: Surface,
    cancel: CancellationToken,
}

impl HandlerContext {
    pub fn new(surface: Surface) -> Self {
        Self::with_cancellation(surface, CancellationToken::new())
    }

    pub fn with_cancellation(surface: Surface, cancel: CancellationToken) -> Self {
        Self { surface, cancel }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Future returned by a boxed handler
pub type HandlerFuture = BoxFuture<'static, anyhow::Result<Output>>;

/// The single function that executes every option of a menu
pub type Handler<T> = Arc<dyn Fn(HandlerContext, T, FieldMap) -> HandlerFuture + Send + Sync>;

/// An invokable tool as seen by a surface adapter
#[async_trait]
pub trait MenuTool: Send + Sync {
    /// Name, description and schema to advertise
    fn identity(&self) -> &ToolIdentity;

    /// Flat tool name
    fn name(&self) -> &str {
        &self.identity().name
    }

    /// Resolve `arguments` and run the handler
    async fn invoke(
        &self,
        ctx: HandlerContext,
        arguments: &JsonObject,
    ) -> Result<Output, DispatchError>;

    /// Parse a raw JSON payload, then [`MenuTool::invoke`]
    async fn invoke_raw(&self, ctx: HandlerContext, raw: &[u8]) -> Result<Output, DispatchError> {
        let arguments = parse_arguments(raw)?;
        self.invoke(ctx, &arguments).await
    }
}

/// Run a handler, replacing any error with [`DispatchError::HandlerFailure`]
pub async fn run_handler<T>(
    handler: &Handler<T>,
    ctx: HandlerContext,
    value: T,
    fields: FieldMap,
) -> Result<Output, DispatchError> {
    handler(ctx, value, fields)
        .await
        .map_err(|_| DispatchError::HandlerFailure)
}

/// [`MenuTool`] backed by one option of a menu
pub struct OptionTool<T> {
    identity: ToolIdentity,
    value: T,
    fields: Vec<Field>,
    handler: Handler<T>,
}

impl<T> OptionTool<T> {
    pub fn new(identity: ToolIdentity, value: T, fields: Vec<Field>, handler: Handler<T>) -> Self {
        Self {
            identity,
            value,
            fields,
            handler,
        }
    }
}

#[async_trait]
impl<T> MenuTool for OptionTool<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn identity(&self) -> &ToolIdentity {
        &self.identity
    }

    async fn invoke(
        &self,
        ctx: HandlerContext,
        arguments: &JsonObject,
    ) -> Result<Output, DispatchError> {
        let fields = resolve_fields(&self.fields, arguments)?;
        tracing::debug!(
            "Dispatching {} from {} with {} fields",
            self.identity.name,
            ctx.surface(),
            fields.len()
        );
        run_handler(&self.handler, ctx, self.value.clone(), fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::option::MenuOption;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn handler_counting(calls: Arc<AtomicUsize>) -> Handler<&'static str> {
        Arc::new(move |_ctx: HandlerContext, action: &'static str, fields: FieldMap| -> HandlerFuture {
            let calls = calls.clone();
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if action == "fail" {
                    anyhow::bail!("db password hunter2 rejected");
                }
                Ok(Output::from(format!("{action}:{}", fields.len())))
            })
        })
    }

    fn tool(value: &'static str, calls: Arc<AtomicUsize>) -> OptionTool<&'static str> {
        let option = MenuOption::new("Add", value).with_field(Field::new().key("title"));
        let identity = ToolIdentity::from_option(Some("note"), &option).unwrap();
        OptionTool::new(identity, value, option.fields, handler_counting(calls))
    }

    #[test_log::test(tokio::test)]
    async fn test_invoke_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tool = tool("add", calls.clone());
        let args = json!({"title": "hello"});
        let output = tool
            .invoke(HandlerContext::new(Surface::Mcp), args.as_object().unwrap())
            .await
            .unwrap();
        assert_eq!(output, Output::from("add:1"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(tool.name(), "note_add");
    }

    #[test_log::test(tokio::test)]
    async fn test_validation_failure_skips_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tool = tool("add", calls.clone());
        let err = tool
            .invoke(HandlerContext::new(Surface::Http), &JsonObject::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::Validation(ValidationError::MissingRequiredField {
                key: "title".into()
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test_log::test(tokio::test)]
    async fn test_handler_error_is_sanitized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tool = tool("fail", calls);
        let args = json!({"title": "x"});
        let err = tool
            .invoke(HandlerContext::new(Surface::Cli), args.as_object().unwrap())
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::HandlerFailure);
        assert!(!err.to_string().contains("hunter2"));
        assert!(!format!("{err:?}").contains("hunter2"));
    }

    #[test_log::test(tokio::test)]
    async fn test_invoke_raw_malformed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tool = tool("add", calls.clone());
        let err = tool
            .invoke_raw(HandlerContext::new(Surface::Http), b"{")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Malformed(_)));
        assert_eq!(err.to_string(), "invalid arguments");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_context_passes_token_through() {
        let token = CancellationToken::new();
        let ctx = HandlerContext::with_cancellation(Surface::Interactive, token.clone());
        assert!(!ctx.is_cancelled());
        token.cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.surface().to_string(), "interactive");
    }
}
