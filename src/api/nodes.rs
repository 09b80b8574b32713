/// Action node execution endpoint
///
/// Runs the Customermates node over a batch of items and returns the output items, or
/// the item-tagged error that aborted the run.

use crate::api::AppState;
use crate::crm::NodeOperationError;
use crate::workflow::types::{ExecutionContext, Item};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for a node run
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteNodeRequest {
    /// Node parameters (resource, operation, fields)
    pub params: Value,
    /// JSON payloads of the input items
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub continue_on_fail: bool,
}

/// Response for a completed node run
#[derive(Debug, Serialize)]
pub struct ExecuteNodeResponse {
    pub items: Vec<Item>,
}

/// Create node execution routes
pub fn create_node_routes() -> Router<AppState> {
    Router::new().route("/api/nodes/customermates/execute", post(execute_node))
}

/// Execute the node
///
/// POST /api/nodes/customermates/execute
/// Body: { "params": { "resource": "contact", "operation": "get", "contactId": "..." }, "items": [...], "continueOnFail": false }
async fn execute_node(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteNodeRequest>,
) -> Result<Json<ExecuteNodeResponse>, (StatusCode, Json<NodeOperationError>)> {
    let items = payload.items.into_iter().map(Item::new).collect();
    let context = ExecutionContext::new(payload.params, items, payload.continue_on_fail);

    match state.engine.execute(context).await {
        Ok(result) => Ok(Json(ExecuteNodeResponse { items: result.data })),
        Err(e) => {
            tracing::warn!("❌ Node execution failed at item {}: {}", e.item_index, e.message);
            // 422 for operation failures, the run itself was well-formed
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(e)))
        }
    }
}
