/// CRM resources and the operations applicable to them
///
/// The `(resource, operation)` pair selects what a node run does. Per-resource request
/// details (paths, envelope keys, field lists) live in the catalog.

pub mod catalog;
pub mod fields;

use crate::crm::OperationFailure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use catalog::{descriptor, FieldKind, FieldSpec, ResourceDescriptor, CATALOG};
pub use fields::{CustomFieldValue, ServiceLine};

/// CRM entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Contact,
    Organization,
    Deal,
    Service,
    Task,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Contact,
        Resource::Organization,
        Resource::Deal,
        Resource::Service,
        Resource::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Contact => "contact",
            Resource::Organization => "organization",
            Resource::Deal => "deal",
            Resource::Service => "service",
            Resource::Task => "task",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = OperationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| OperationFailure::UnknownResource(s.to_string()))
    }
}

/// Operation applied to a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Create,
    Get,
    GetAll,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Get,
        Operation::GetAll,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::GetAll => "getAll",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = OperationFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| OperationFailure::UnknownOperation(s.to_string()))
    }
}
