/// Typed request-body fragments and parameter-to-body conversion
///
/// Parameters arrive in the node UI shape (`customFieldValues: { field: [...] }`,
/// `services: { service: [...] }`) or as plain arrays; both normalise to the wire format.

use super::catalog::{FieldKind, FieldSpec};
use crate::crm::OperationFailure;
use crate::workflow::params::{invalid, value_to_number, value_to_string};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::HashSet;

/// Value for a tenant-defined custom column; always transmitted as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValue {
    pub column_id: String,
    pub value: String,
}

/// Service line attached to a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub service_id: String,
    #[serde(serialize_with = "whole_numbers_as_integers")]
    pub quantity: f64,
}

// Quantities are usually counts; send `2`, not `2.0`
fn whole_numbers_as_integers<S: Serializer>(quantity: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if quantity.fract() == 0.0 && quantity.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*quantity as i64)
    } else {
        serializer.serialize_f64(*quantity)
    }
}

/// Keep the first value per column and drop later duplicates
pub fn dedupe_custom_field_values(values: Vec<CustomFieldValue>) -> Vec<CustomFieldValue> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.column_id.clone()))
        .collect()
}

/// Convert a parameter value into the request-body value for `spec`
pub fn body_value(spec: &FieldSpec, value: &Value) -> Result<Value, OperationFailure> {
    match spec.kind {
        FieldKind::Text => Ok(Value::String(value_to_string(spec.name, value)?)),
        FieldKind::Number => number_value(spec.name, value),
        FieldKind::IdList => Ok(Value::from(parse_id_list(spec.name, value)?)),
        FieldKind::Services => to_json(spec.name, &parse_services(spec.name, value)?),
        FieldKind::CustomFieldValues => {
            to_json(spec.name, &parse_custom_field_values(spec.name, value)?)
        }
    }
}

/// Empty body value used for optional list fields on create
pub fn empty_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Text => Value::String(String::new()),
        FieldKind::Number => Value::Null,
        FieldKind::IdList | FieldKind::Services | FieldKind::CustomFieldValues => {
            Value::Array(Vec::new())
        }
    }
}

/// ID list from an array, or from a comma-separated string produced by an expression
pub fn parse_id_list(name: &str, value: &Value) -> Result<Vec<String>, OperationFailure> {
    match value {
        Value::Array(values) => values.iter().map(|v| value_to_string(name, v)).collect(),
        Value::String(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()),
        other => Err(invalid(name, format!("expected a list of IDs, got {}", other))),
    }
}

pub fn parse_custom_field_values(
    name: &str,
    value: &Value,
) -> Result<Vec<CustomFieldValue>, OperationFailure> {
    entries(name, value, "field")?
        .iter()
        .map(|entry| {
            let column_id = entry
                .get("columnId")
                .filter(|v| !v.is_null())
                .ok_or_else(|| invalid(name, "custom field entry without columnId".to_string()))
                .and_then(|v| value_to_string(name, v))?;
            let value = match entry.get("value") {
                None | Some(Value::Null) => String::new(),
                Some(v) => value_to_string(name, v)?,
            };
            Ok(CustomFieldValue { column_id, value })
        })
        .collect()
}

pub fn parse_services(name: &str, value: &Value) -> Result<Vec<ServiceLine>, OperationFailure> {
    entries(name, value, "service")?
        .iter()
        .map(|entry| {
            let service_id = entry
                .get("serviceId")
                .filter(|v| !v.is_null())
                .ok_or_else(|| invalid(name, "service entry without serviceId".to_string()))
                .and_then(|v| value_to_string(name, v))?;
            let quantity = match entry.get("quantity") {
                None | Some(Value::Null) => 1.0,
                Some(v) => value_to_number(name, v)?,
            };
            if !quantity.is_finite() {
                return Err(invalid(name, format!("{} is not a finite quantity", quantity)));
            }
            Ok(ServiceLine { service_id, quantity })
        })
        .collect()
}

/// Unwrap `{ <key>: [...] }` or accept a bare array
fn entries<'a>(name: &str, value: &'a Value, key: &str) -> Result<&'a [Value], OperationFailure> {
    match value {
        Value::Array(values) => Ok(values),
        Value::Object(map) => match map.get(key) {
            Some(Value::Array(values)) => Ok(values),
            None | Some(Value::Null) => Ok(&[]),
            Some(other) => Err(invalid(name, format!("expected a list under \"{}\", got {}", key, other))),
        },
        other => Err(invalid(name, format!("expected a list, got {}", other))),
    }
}

fn number_value(name: &str, value: &Value) -> Result<Value, OperationFailure> {
    if let Value::Number(_) = value {
        return Ok(value.clone());
    }
    let parsed = value_to_number(name, value)?;
    if parsed.fract() == 0.0 && parsed.abs() < i64::MAX as f64 {
        return Ok(Value::from(parsed as i64));
    }
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| invalid(name, format!("{} is not a finite number", parsed)))
}

fn to_json<T: Serialize>(name: &str, value: &T) -> Result<Value, OperationFailure> {
    serde_json::to_value(value).map_err(|e| invalid(name, e.to_string()))
}
