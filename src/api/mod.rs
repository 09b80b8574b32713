/// HTTP API Layer
///
/// This module provides the REST endpoints exposing the Customermates nodes:
/// - Action node execution (create/get/getAll/update/delete per resource)
/// - Webhook trigger intake and trigger registration
/// - Dropdown option loaders and credential test

use crate::runtime::ExecutionEngine;
use crate::workflow::TriggerRegistry;
use std::sync::Arc;
use tokio::sync::broadcast;

// Action node execution endpoint
pub mod nodes;

// Option loaders and credential test
pub mod options;

// Webhook trigger intake and registration
pub mod webhooks;

pub use webhooks::TriggerDelivery;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Engine running the action node
    pub engine: Arc<ExecutionEngine>,
    /// Hot-reload registry of active webhook triggers
    pub registry: Arc<TriggerRegistry>,
    /// Accepted trigger output, for in-process workflow consumers
    pub deliveries: broadcast::Sender<TriggerDelivery>,
}

impl AppState {
    pub fn new(engine: Arc<ExecutionEngine>, registry: Arc<TriggerRegistry>) -> Self {
        let (deliveries, _) = broadcast::channel(256);
        Self {
            engine,
            registry,
            deliveries,
        }
    }
}

// Re-export router builders
pub use nodes::create_node_routes;
pub use options::create_option_routes;
pub use webhooks::create_webhook_routes;
