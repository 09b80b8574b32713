/// Customermates nodes: workflow integration for the Customermates CRM
///
/// This library provides an action node (create/get/getAll/update/delete on contacts,
/// organizations, deals, services and tasks) and a webhook trigger node, served over HTTP.

// Core configuration and setup
pub mod config;

// Customermates REST client and error types
pub mod crm;

// Resource catalog - collections, envelopes, fields and body shaping
pub mod resources;

// Per-operation request building and response shaping
pub mod operations;

// Workflow integration layer - items, parameter resolution, trigger registry
pub mod workflow;

// Runtime execution engine - per-item dispatch and error policy
pub mod runtime;

// Webhook trigger node - event allow-list and payload mapping
pub mod trigger;

// HTTP API layer - node execution, webhook intake, option loaders
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use crm::{CrmClient, CrmError, NodeOperationError};
pub use resources::{Operation, Resource};
pub use runtime::{ExecutionEngine, ExecutionResult};
pub use trigger::{WebhookEvent, WebhookTrigger};
pub use workflow::{ExecutionContext, Item};
pub use server::start_server;
