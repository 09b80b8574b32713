/// Node run engine: the per-item loop of the Customermates node
///
/// Resolves the `(resource, operation)` selection from the first item's parameters, then
/// executes every input item in order. A failing item either aborts the run with a
/// `NodeOperationError` tagged with its index, or, when the run continues on failure,
/// becomes an error record and processing moves on to the next item.

use crate::crm::{NodeOperationError, OperationFailure};
use crate::resources::{Operation, Resource};
use crate::runtime::executor::NodeExecutor;
use crate::workflow::params::NodeParameters;
use crate::workflow::types::{ExecutionContext, Item};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

/// Result of executing a node run
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Output items, each paired with the input item it came from
    pub data: Vec<Item>,
    /// Execution metadata carried over from the context
    pub metadata: HashMap<String, Value>,
}

/// Runs node executions item by item
#[derive(Debug)]
pub struct ExecutionEngine {
    /// Node executor for handling individual items
    executor: Arc<NodeExecutor>,
}

impl ExecutionEngine {
    /// Create new execution engine with node executor
    pub fn new(executor: Arc<NodeExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &NodeExecutor {
        &self.executor
    }

    /// Execute the node over all items of the context
    pub async fn execute(&self, context: ExecutionContext) -> Result<ExecutionResult, NodeOperationError> {
        let run_start_time = std::time::Instant::now();
        let first_item = context.items.first().map(|i| i.json.clone()).unwrap_or(Value::Null);
        let selectors = NodeParameters::resolve(&context.params, &first_item, 0);

        tracing::info!(
            "🚀 Starting node run: {} item(s), continue_on_fail = {}",
            context.items.len(),
            context.continue_on_fail
        );

        let mut data = Vec::new();

        for (index, item) in context.items.iter().enumerate() {
            let outcome = async {
                let (resource, operation) = select(&selectors)?;
                let params = NodeParameters::resolve(&context.params, &item.json, index);
                self.executor.execute_item(resource, operation, &params).await
            }
            .await;

            match outcome {
                Ok(records) => {
                    data.extend(records.into_iter().map(|json| Item::paired(json, index)));
                }
                Err(failure) if context.continue_on_fail => {
                    tracing::warn!("⚠️ Item {} failed, continuing: {}", index, failure);
                    data.push(Item::error(failure.payload(), index));
                }
                Err(failure) => {
                    let error = NodeOperationError::from_failure(&failure, index);
                    tracing::error!(
                        "❌ Node run aborted at item {} after {:?} - Error: {}",
                        index,
                        run_start_time.elapsed(),
                        error.message
                    );
                    return Err(error);
                }
            }
        }

        tracing::info!(
            "🎉 Node run completed: {} output item(s) in {:?}",
            data.len(),
            run_start_time.elapsed()
        );

        Ok(ExecutionResult {
            data,
            metadata: context.metadata,
        })
    }
}

/// Parse the resource/operation selection
fn select(params: &NodeParameters) -> Result<(Resource, Operation), OperationFailure> {
    let resource = params.selector("resource")?.parse::<Resource>()?;
    let operation = params.selector("operation")?.parse::<Operation>()?;
    Ok((resource, operation))
}
