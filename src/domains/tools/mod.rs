//! Tools domain module.
//!
//! Tools are the operations MCP clients can call. Each call flows through the
//! same pipeline:
//!
//! - `registry.rs` - catalog and argument validation
//! - `translator.rs` - tool call to HTTP request or status probe
//! - `probe.rs` - ordered fallback for the status tools
//! - `classifier.rs` - HTTP outcome to result envelope
//! - `dispatcher.rs` - runs the pipeline
//! - `router.rs` - rmcp ToolRouter built from the registry
//!
//! ## Adding a New Tool
//!
//! 1. Describe it in `definitions/` (descriptor plus argument structs)
//! 2. Register the descriptor in `registry.rs`
//! 3. Map its name to a request in `translator.rs`
//!
//! The router picks up new descriptors automatically.

pub mod classifier;
pub mod definitions;
pub mod descriptor;
pub mod dispatcher;
pub mod envelope;
mod error;
pub mod probe;
mod registry;
pub mod router;
pub mod translator;

pub use descriptor::{ParamSpec, ParamType, ToolDescriptor};
pub use dispatcher::ToolDispatcher;
pub use envelope::{FailureKind, ResultEnvelope};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use translator::{RequestTranslator, Translation};
