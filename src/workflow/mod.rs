/// Workflow integration layer
///
/// Types shared with the host workflow engine:
/// - Items and the per-run execution context
/// - Item-scoped parameter resolution (`$json.*` references)
/// - Lock-free hot-reload registry of active webhook triggers using ArcSwap

// Core item/context type definitions
pub mod types;

// Parameter resolution against the current item
pub mod params;

// Hot-reload trigger registry using ArcSwap
pub mod registry;

// Re-export commonly used types
pub use params::NodeParameters;
pub use registry::TriggerRegistry;
pub use types::{ExecutionContext, Item, PairedItem};
