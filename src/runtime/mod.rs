/// Runtime Execution Engine
///
/// This module runs the Customermates action node. It handles:
/// - Selecting the operation module for a `(resource, operation)` pair
/// - Per-item execution with item-scoped parameters
/// - Continue-on-failure error records vs. aborting with an item-tagged error

// Item loop and error policy
pub mod engine;

// Per-item operation dispatch
pub mod executor;

// Re-export main types
pub use engine::{ExecutionEngine, ExecutionResult};
pub use executor::NodeExecutor;
