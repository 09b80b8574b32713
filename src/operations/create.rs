/// Create a record: POST /{collection}
///
/// Required fields are top-level parameters; optional fields come from `additionalFields`
/// and are always sent, defaulting to empty lists.

use super::{object, unwrap_envelope, OperationOutput};
use crate::crm::{CrmClient, OperationFailure};
use crate::resources::fields::{body_value, empty_value};
use crate::resources::ResourceDescriptor;
use crate::workflow::params::NodeParameters;
use serde_json::Value;

/// Build the create request body for a resource
pub fn build_body(
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<Value, OperationFailure> {
    let mut body = object();

    for spec in descriptor.required {
        let value = params
            .get(spec.name)
            .ok_or_else(|| OperationFailure::MissingParameter(spec.name.to_string()))?;
        body.insert(spec.name.to_string(), body_value(spec, value)?);
    }

    let additional = params.collection("additionalFields")?;
    for spec in descriptor.optional {
        let value = match additional.get(spec.name).filter(|v| !v.is_null()) {
            Some(value) => body_value(spec, value)?,
            None => empty_value(spec.kind),
        };
        body.insert(spec.name.to_string(), value);
    }

    Ok(Value::Object(body))
}

pub async fn execute(
    client: &CrmClient,
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<OperationOutput, OperationFailure> {
    let body = build_body(descriptor, params)?;
    tracing::debug!("🆕 Creating {} (item {})", descriptor.resource, params.item_index());

    let response = client.post(&descriptor.collection_path(), &body).await?;
    Ok(vec![unwrap_envelope(response, descriptor.envelope)])
}
