/// Update a record: PUT /{collection}/{id}
///
/// Only fields present in `updateFields` are sent. Custom field values are de-duplicated by
/// column, keeping the first occurrence. An update with no fields fails before any request.

use super::{object, path_id, unwrap_envelope, OperationOutput};
use crate::crm::{CrmClient, OperationFailure};
use crate::resources::fields::{body_value, dedupe_custom_field_values, parse_custom_field_values};
use crate::resources::{FieldKind, ResourceDescriptor};
use crate::workflow::params::{invalid, NodeParameters};
use serde_json::Value;

/// Build the update request body from `updateFields`
pub fn build_body(
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<Value, OperationFailure> {
    let update_fields = params.collection("updateFields")?;
    let mut body = object();

    for spec in descriptor.update_fields() {
        let Some(value) = update_fields.get(spec.name).filter(|v| !v.is_null()) else {
            continue;
        };

        // An empty collection in the UI shape means the option was added but left blank
        if let Some(key) = ui_collection_key(spec.kind) {
            if value.is_object() && value.get(key).map_or(true, Value::is_null) {
                continue;
            }
        }

        let encoded = if spec.kind == FieldKind::CustomFieldValues {
            let values = dedupe_custom_field_values(parse_custom_field_values(spec.name, value)?);
            serde_json::to_value(values).map_err(|e| invalid(spec.name, e.to_string()))?
        } else {
            body_value(spec, value)?
        };
        body.insert(spec.name.to_string(), encoded);
    }

    if body.is_empty() {
        return Err(OperationFailure::EmptyUpdate {
            resource: descriptor.resource.to_string(),
        });
    }

    Ok(Value::Object(body))
}

fn ui_collection_key(kind: FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::CustomFieldValues => Some("field"),
        FieldKind::Services => Some("service"),
        _ => None,
    }
}

pub async fn execute(
    client: &CrmClient,
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<OperationOutput, OperationFailure> {
    let id = path_id(descriptor.id_param, params.required_string(descriptor.id_param)?)?;
    let body = build_body(descriptor, params)?;
    tracing::debug!("✏️ Updating {} {} with {} field(s)", descriptor.resource, id,
        body.as_object().map_or(0, |b| b.len()));

    let response = client.put(&descriptor.item_path(&id), &body).await?;
    Ok(vec![unwrap_envelope(response, descriptor.envelope)])
}
