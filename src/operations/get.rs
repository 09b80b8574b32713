/// Fetch one record: GET /{collection}/{id}

use super::{attach_meta, custom_columns, path_id, OperationOutput};
use crate::crm::{CrmClient, OperationFailure};
use crate::resources::ResourceDescriptor;
use crate::workflow::params::NodeParameters;

pub async fn execute(
    client: &CrmClient,
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<OperationOutput, OperationFailure> {
    let id = path_id(descriptor.id_param, params.required_string(descriptor.id_param)?)?;
    tracing::debug!("🔍 Fetching {} {}", descriptor.resource, id);

    let response = client.get(&descriptor.item_path(&id)).await?;

    let entity = response
        .get(descriptor.envelope)
        .filter(|e| !e.is_null())
        .cloned()
        .ok_or_else(|| OperationFailure::NotFound {
            entity: descriptor.display_name.to_string(),
            id: id.clone(),
        })?;

    Ok(vec![attach_meta(entity, custom_columns(&response).as_ref())])
}
