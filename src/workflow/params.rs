/// Item-scoped node parameter access
///
/// Node parameters are one JSON object shared by every item. String values written as
/// `$json.<path>` are evaluated against the current item, so each item can supply its own
/// IDs and field values. `null` counts as "not provided".

use crate::crm::OperationFailure;
use serde_json::{Map, Value};

/// Parameters resolved for a single input item
#[derive(Debug, Clone)]
pub struct NodeParameters {
    resolved: Map<String, Value>,
    item_index: usize,
}

impl NodeParameters {
    /// Resolve the node parameters against the item at `item_index`
    pub fn resolve(params: &Value, item: &Value, item_index: usize) -> Self {
        let resolved = match resolve_value(params, item) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { resolved, item_index }
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Raw resolved value, `None` when missing or null
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.resolved.get(name).filter(|v| !v.is_null())
    }

    /// Required string parameter
    pub fn required_string(&self, name: &str) -> Result<String, OperationFailure> {
        match self.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::String(_)) | None => Err(OperationFailure::MissingParameter(name.to_string())),
            Some(other) => Err(invalid(name, format!("expected a string, got {}", other))),
        }
    }

    /// Boolean parameter with a default
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, OperationFailure> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) if s == "true" => Ok(true),
            Some(Value::String(s)) if s == "false" => Ok(false),
            Some(other) => Err(invalid(name, format!("expected a boolean, got {}", other))),
        }
    }

    /// Collection parameter (e.g. `additionalFields`); missing means empty
    pub fn collection(&self, name: &str) -> Result<Map<String, Value>, OperationFailure> {
        match self.get(name) {
            None => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(other) => Err(invalid(name, format!("expected an object, got {}", other))),
        }
    }

    /// Operation selector such as `resource` or `operation`
    pub fn selector(&self, name: &str) -> Result<String, OperationFailure> {
        self.required_string(name)
    }
}

/// Convert a field value to a string, accepting numbers
pub fn value_to_string(name: &str, value: &Value) -> Result<String, OperationFailure> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(name, format!("expected a string, got {}", other))),
    }
}

/// Convert a field value to a number, accepting numeric strings
pub fn value_to_number(name: &str, value: &Value) -> Result<f64, OperationFailure> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(name, format!("{} is not representable", n))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(name, format!("\"{}\" is not a number", s))),
        other => Err(invalid(name, format!("expected a number, got {}", other))),
    }
}

pub(crate) fn invalid(name: &str, reason: String) -> OperationFailure {
    OperationFailure::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}

/// Recursively substitute `$json` references with values from the item
fn resolve_value(value: &Value, item: &Value) -> Value {
    match value {
        Value::String(expr) if expr == "$json" => item.clone(),
        Value::String(expr) if expr.starts_with("$json.") => extract_json_field(item, &expr[6..]),
        Value::Array(values) => Value::Array(values.iter().map(|v| resolve_value(v, item)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_value(v, item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Extract field from item JSON using simple dot notation ("user.name", "ids.0")
fn extract_json_field(item: &Value, field_path: &str) -> Value {
    let mut current = item;
    for part in field_path.split('.') {
        current = match current {
            Value::Object(obj) => obj.get(part).unwrap_or(&Value::Null),
            Value::Array(arr) => part
                .parse::<usize>()
                .ok()
                .and_then(|i| arr.get(i))
                .unwrap_or(&Value::Null),
            _ => return Value::Null,
        };
    }
    current.clone()
}
