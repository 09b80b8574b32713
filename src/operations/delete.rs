/// Delete a record: DELETE /{collection}/{id}
///
/// The API answers with the deleted ID; the output record is `{ "id": <response> }`.

use super::{path_id, OperationOutput};
use crate::crm::{CrmClient, OperationFailure};
use crate::resources::ResourceDescriptor;
use crate::workflow::params::NodeParameters;
use serde_json::json;

pub async fn execute(
    client: &CrmClient,
    descriptor: &ResourceDescriptor,
    params: &NodeParameters,
) -> Result<OperationOutput, OperationFailure> {
    let id = path_id(descriptor.id_param, params.required_string(descriptor.id_param)?)?;
    tracing::debug!("🗑️ Deleting {} {}", descriptor.resource, id);

    let response = client.delete(&descriptor.item_path(&id)).await?;
    Ok(vec![json!({ "id": response })])
}
