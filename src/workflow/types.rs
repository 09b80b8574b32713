/// Core workflow type definitions
///
/// Items are the unit of data flowing between nodes: a JSON record plus the index of the
/// input item it was derived from. A node run receives an array of items (n8n-style batch
/// processing) and produces an array of items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Pointer back to the input item an output was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One record flowing through a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Record payload
    pub json: Value,
    /// Originating input item, absent for trigger output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<PairedItem>,
}

impl Item {
    /// Item without lineage (e.g. produced by a trigger)
    pub fn new(json: Value) -> Self {
        Self { json, paired_item: None }
    }

    /// Item derived from input item `index`
    pub fn paired(json: Value, index: usize) -> Self {
        Self {
            json,
            paired_item: Some(PairedItem { item: index }),
        }
    }

    /// Error record emitted for a failed item when the run continues on failure
    pub fn error(payload: Value, index: usize) -> Self {
        let mut json = Map::new();
        json.insert("error".to_string(), payload);
        Self::paired(Value::Object(json), index)
    }
}

/// Runtime execution context for one node run
///
/// Contains the node parameters, the input items and the run policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    /// Node parameters shared by all items; `$json.*` strings resolve per item
    pub params: Value,
    /// Input items; a run without input behaves like a single empty item
    #[serde(default)]
    pub items: Vec<Item>,
    /// Emit error records instead of aborting on the first failing item
    #[serde(default)]
    pub continue_on_fail: bool,
    /// Execution metadata (execution_id, timestamps, etc)
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl ExecutionContext {
    /// Create a context for a node run
    pub fn new(params: Value, items: Vec<Item>, continue_on_fail: bool) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(
            "execution_id".to_string(),
            Value::String(uuid::Uuid::new_v4().to_string()),
        );
        metadata.insert(
            "started_at".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );

        // A manual run without input still executes once
        let items = if items.is_empty() {
            vec![Item::new(Value::Object(Map::new()))]
        } else {
            items
        };

        Self {
            params,
            items,
            continue_on_fail,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_item_wraps_payload() {
        let item = Item::error(json!({ "error": "boom" }), 2);
        assert_eq!(item.json, json!({ "error": { "error": "boom" } }));
        assert_eq!(item.paired_item, Some(PairedItem { item: 2 }));
    }

    #[test]
    fn empty_input_runs_once() {
        let ctx = ExecutionContext::new(json!({}), vec![], false);
        assert_eq!(ctx.items.len(), 1);
        assert!(ctx.metadata.contains_key("execution_id"));
    }

    #[test]
    fn items_serialize_with_camel_case_lineage() {
        let value = serde_json::to_value(Item::paired(json!({ "id": "c1" }), 0)).unwrap();
        assert_eq!(value, json!({ "json": { "id": "c1" }, "pairedItem": { "item": 0 } }));
    }
}
