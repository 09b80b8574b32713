/// Webhook trigger endpoints
///
/// Inbound CRM events arrive at `/webhook/{trigger_id}`. The registered trigger filters
/// them by its event allow-list; accepted events are returned and broadcast to in-process
/// consumers. Triggers are managed under `/api/triggers`.

use crate::api::AppState;
use crate::trigger::{WebhookPayload, WebhookTrigger};
use crate::workflow::types::Item;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{post, put, get},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

/// Accepted trigger output, published on the delivery channel
#[derive(Debug, Clone, Serialize)]
pub struct TriggerDelivery {
    pub delivery_id: String,
    pub trigger_id: String,
    pub received_at: DateTime<Utc>,
    pub items: Vec<Item>,
}

/// Create webhook routes
pub fn create_webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/webhook/{trigger_id}", post(receive_webhook))
        .route("/api/triggers", get(list_triggers))
        .route("/api/triggers/{trigger_id}", put(register_trigger).delete(delete_trigger))
}

/// Receive a CRM event
///
/// POST /webhook/{trigger_id}
/// Body: { "event": "contact.created", "data": {...}, "timestamp": "..." }
async fn receive_webhook(
    State(state): State<AppState>,
    Path(trigger_id): Path<String>,
    body: String,
) -> Result<Json<Vec<Item>>, StatusCode> {
    tracing::info!("📥 Webhook request received: {}", trigger_id);
    tracing::debug!("📄 Request body: {}", body);

    let trigger = match state.registry.get(&trigger_id) {
        Some(trigger) => trigger,
        None => {
            tracing::warn!("❌ Webhook called for unknown trigger: {}", trigger_id);
            return Err(StatusCode::NOT_FOUND);
        }
    };

    // Parse JSON body manually to handle errors gracefully
    let payload: WebhookPayload = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("❌ Invalid webhook payload for {} - Error: {}", trigger_id, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let items = trigger.handle(payload);

    if !items.is_empty() {
        let delivery = TriggerDelivery {
            delivery_id: uuid::Uuid::new_v4().to_string(),
            trigger_id: trigger_id.clone(),
            received_at: Utc::now(),
            items: items.clone(),
        };
        if state.deliveries.send(delivery).is_err() {
            tracing::debug!("No subscribers for trigger deliveries on {}", trigger_id);
        }
    }

    tracing::info!("🎉 Webhook {} emitted {} item(s)", trigger_id, items.len());
    Ok(Json(items))
}

/// List registered triggers
///
/// GET /api/triggers
async fn list_triggers(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "triggers": state.registry.list() }))
}

/// Register or replace a trigger
///
/// PUT /api/triggers/{trigger_id}
/// Body: { "events": ["contact.created", "deal.updated"] }
async fn register_trigger(
    State(state): State<AppState>,
    Path(trigger_id): Path<String>,
    Json(trigger): Json<WebhookTrigger>,
) -> Json<Value> {
    let replaced = state.registry.upsert(&trigger_id, trigger);
    let action = if replaced { "updated" } else { "registered" };
    Json(json!({
        "id": trigger_id,
        "message": format!("Trigger '{}' {} successfully", trigger_id, action),
    }))
}

/// Remove a trigger
///
/// DELETE /api/triggers/{trigger_id}
async fn delete_trigger(
    State(state): State<AppState>,
    Path(trigger_id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    if state.registry.remove(&trigger_id) {
        Ok(Json(json!({ "message": "Trigger deleted successfully" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
