/// Error types for CRM calls and node execution
///
/// `CrmError` covers a single HTTP round trip. `NodeOperationError` is what a node run
/// surfaces to the workflow: a message plus the index of the input item that failed.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failure of one request against the Customermates API
#[derive(Error, Debug)]
pub enum CrmError {
    /// Non-2xx response; `body` is the server's error payload (JSON when parseable)
    #[error("Customermates API returned {status}: {body}")]
    Api { status: u16, body: Value },

    /// Connection, TLS or timeout failure before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose body is not valid JSON
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl CrmError {
    /// Server error payload, when the failure came from the API itself
    pub fn server_body(&self) -> Option<&Value> {
        match self {
            CrmError::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Failure while executing one input item of a node
#[derive(Error, Debug)]
pub enum OperationFailure {
    #[error(transparent)]
    Crm(#[from] CrmError),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid value for parameter \"{name}\": {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("{entity} with ID \"{id}\" not found")]
    NotFound { entity: String, id: String },

    #[error("At least one field must be provided in Update Fields to update the {resource}")]
    EmptyUpdate { resource: String },

    #[error("The resource \"{0}\" is not known!")]
    UnknownResource(String),

    #[error("The operation \"{0}\" is not known!")]
    UnknownOperation(String),
}

impl OperationFailure {
    /// Payload reported for this failure: the server's error body if the API rejected the
    /// call, otherwise the message
    pub fn payload(&self) -> Value {
        match self {
            OperationFailure::Crm(crm) => match crm.server_body() {
                Some(body) if !body.is_null() => body.clone(),
                _ => Value::String(crm.to_string()),
            },
            other => Value::String(other.to_string()),
        }
    }
}

/// Error aborting a node run, tagged with the originating item index
#[derive(Error, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message} [item {item_index}]")]
pub struct NodeOperationError {
    /// Human-readable message
    pub message: String,
    /// Server error body or message, as reported to the workflow
    pub description: Value,
    /// Index of the input item that failed
    pub item_index: usize,
}

impl NodeOperationError {
    /// Wrap an item failure with its index
    pub fn from_failure(failure: &OperationFailure, item_index: usize) -> Self {
        Self {
            message: failure.to_string(),
            description: failure.payload(),
            item_index,
        }
    }
}
