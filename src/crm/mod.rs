/// Customermates REST API access
///
/// Single-request HTTP client plus the error types shared by every operation.

pub mod client;
pub mod error;

pub use client::CrmClient;
pub use error::{CrmError, NodeOperationError, OperationFailure};
