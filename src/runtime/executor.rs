/// Per-item operation dispatch
///
/// Routes one input item to the operation module selected by the `(resource, operation)`
/// pair and returns the output records for that item.

use crate::crm::{CrmClient, OperationFailure};
use crate::operations::{self, OperationOutput};
use crate::resources::{descriptor, Operation, Resource};
use crate::workflow::params::NodeParameters;

/// Executes single items against the CRM
#[derive(Debug, Clone)]
pub struct NodeExecutor {
    /// Shared API client (base URL + credential)
    client: CrmClient,
}

impl NodeExecutor {
    /// Create new node executor bound to a CRM client
    pub fn new(client: CrmClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CrmClient {
        &self.client
    }

    /// Execute one item
    ///
    /// Dispatches to the appropriate operation module based on the selected pair.
    pub async fn execute_item(
        &self,
        resource: Resource,
        operation: Operation,
        params: &NodeParameters,
    ) -> Result<OperationOutput, OperationFailure> {
        let row = descriptor(resource);
        tracing::debug!("🚀 Item {}: {} {}", params.item_index(), operation, resource);

        match operation {
            Operation::Create => operations::create::execute(&self.client, row, params).await,
            Operation::Get => operations::get::execute(&self.client, row, params).await,
            Operation::GetAll => operations::get_all::execute(&self.client, row, params).await,
            Operation::Update => operations::update::execute(&self.client, row, params).await,
            Operation::Delete => operations::delete::execute(&self.client, row, params).await,
        }
    }
}
