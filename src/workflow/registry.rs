/// Hot-reload webhook trigger registry using ArcSwap
///
/// Provides lock-free, atomic updates to the in-memory set of active triggers.
/// Each update swaps the entire map pointer, so inbound webhook calls keep reading a
/// consistent snapshot while registrations change.

use crate::trigger::WebhookTrigger;
use arc_swap::ArcSwap;
use std::{collections::HashMap, sync::Arc};

/// Lock-free trigger registry
///
/// Key: trigger_id (the path segment of `/webhook/{trigger_id}`), Value: trigger config.
#[derive(Debug)]
pub struct TriggerRegistry {
    triggers: ArcSwap<HashMap<String, WebhookTrigger>>,
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            triggers: ArcSwap::new(Arc::new(HashMap::new())),
        }
    }

    /// Register or replace a trigger
    ///
    /// Returns true when an existing trigger was replaced.
    pub fn upsert(&self, trigger_id: &str, trigger: WebhookTrigger) -> bool {
        let current = self.triggers.load();
        let mut new_registry = (**current).clone();
        let replaced = new_registry.insert(trigger_id.to_string(), trigger).is_some();

        // Atomic swap to new registry
        self.triggers.store(Arc::new(new_registry));

        tracing::info!("🔥 {} webhook trigger: {}", if replaced { "Hot-reloaded" } else { "Registered" }, trigger_id);
        replaced
    }

    /// Get a trigger by ID (lock-free read)
    pub fn get(&self, trigger_id: &str) -> Option<WebhookTrigger> {
        self.triggers.load().get(trigger_id).cloned()
    }

    /// Snapshot of all registered triggers
    pub fn list(&self) -> HashMap<String, WebhookTrigger> {
        (**self.triggers.load()).clone()
    }

    /// Remove a trigger; returns whether it existed
    pub fn remove(&self, trigger_id: &str) -> bool {
        let current = self.triggers.load();
        let mut new_registry = (**current).clone();

        if new_registry.remove(trigger_id).is_some() {
            self.triggers.store(Arc::new(new_registry));
            tracing::info!("Removed webhook trigger from registry: {}", trigger_id);
            true
        } else {
            false
        }
    }
}
