/// Customermates event trigger
///
/// Accepts inbound CRM webhook payloads and emits them as workflow items when their event
/// is in the trigger's allow-list. Anything else yields no output.

pub mod events;

use crate::workflow::types::Item;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub use events::{EventAction, UnknownEvent, WebhookEvent};

/// Payload the CRM posts to the webhook
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Event name; kept raw so names outside the vocabulary can be ignored
    pub event: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub timestamp: Value,
}

/// Trigger node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookTrigger {
    /// Events to listen to
    pub events: Vec<WebhookEvent>,
}

impl WebhookTrigger {
    pub fn new(events: Vec<WebhookEvent>) -> Self {
        Self { events }
    }

    /// Whether an event name is in the allow-list
    pub fn accepts(&self, event: &str) -> bool {
        event
            .parse::<WebhookEvent>()
            .map(|parsed| self.events.contains(&parsed))
            .unwrap_or(false)
    }

    /// Items emitted for one inbound payload: one item if accepted, none otherwise
    pub fn handle(&self, payload: WebhookPayload) -> Vec<Item> {
        if !self.accepts(&payload.event) {
            tracing::debug!("🔕 Ignoring webhook event not in allow-list: {}", payload.event);
            return Vec::new();
        }

        tracing::debug!("🔔 Accepted webhook event: {}", payload.event);
        vec![Item::new(json!({
            "event": payload.event,
            "data": payload.data,
            "timestamp": payload.timestamp,
        }))]
    }
}
