//! Plain HTTP tool endpoints
//!
//! | Route                    | Response                                  |
//! |--------------------------|-------------------------------------------|
//! | `GET /tools`             | server name and every tool document       |
//! | `GET /tools/:name`       | one tool document                         |
//! | `POST /tools/:name/run`  | `{"result": ..}` or `{"code","message"}`  |

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use menukit::{DispatchError, HandlerContext, JsonObject, Surface, ToolIdentity, ToolRegistry};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// One tool as advertised over HTTP
#[derive(Debug, Clone, Serialize)]
pub struct ToolDocument {
    pub name: String,
    pub description: String,
    pub parameters: JsonObject,
}

impl From<&ToolIdentity> for ToolDocument {
    fn from(identity: &ToolIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            description: identity.description.clone(),
            parameters: identity.input_schema(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolListing {
    pub name: String,
    pub tools: Vec<ToolDocument>,
}

/// Failure shapes of the tool endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("tool not found: {0}")]
    NotFound(String),

    /// Body was not a JSON object; detail is never returned
    #[error("invalid arguments")]
    InvalidRequest,

    #[error("{0}")]
    InvalidArguments(String),

    #[error("tool execution failed")]
    ExecutionFailed,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidRequest => "invalid_request",
            ApiError::InvalidArguments(_) => "invalid_arguments",
            ApiError::ExecutionFailed => "execution_failed",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest | ApiError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            ApiError::ExecutionFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Validation(e) => ApiError::InvalidArguments(e.to_string()),
            DispatchError::Malformed(_) => ApiError::InvalidRequest,
            DispatchError::HandlerFailure => ApiError::ExecutionFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

/// Router with the tool endpoints bound to `registry`
pub fn tool_router(registry: Arc<ToolRegistry>) -> Router {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/:name", get(get_tool))
        .route("/tools/:name/run", post(run_tool))
        .with_state(registry)
}

async fn list_tools(State(registry): State<Arc<ToolRegistry>>) -> Json<ToolListing> {
    Json(ToolListing {
        name: registry.server_description(),
        tools: registry.identities().map(ToolDocument::from).collect(),
    })
}

async fn get_tool(
    State(registry): State<Arc<ToolRegistry>>,
    Path(name): Path<String>,
) -> Result<Json<ToolDocument>, ApiError> {
    let tool = registry.get(&name).ok_or(ApiError::NotFound(name))?;
    Ok(Json(ToolDocument::from(tool.identity())))
}

async fn run_tool(
    State(registry): State<Arc<ToolRegistry>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let tool = registry
        .get(&name)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(name.clone()))?;

    let output = tool
        .invoke_raw(HandlerContext::new(Surface::Http), &body)
        .await
        .map_err(|err| {
            tracing::debug!("Run of {} failed: {}", name, err);
            ApiError::from(err)
        })?;

    Ok(Json(json!({ "result": output.to_value() })))
}
