//! Node Engine - host contract for friendly pipe nodes
//!
//! This crate describes how a node presents itself to a node-graph host
//! and how the host invokes it. It supports:
//!
//! - Self-describing nodes (`TaskDescriptor`) with typed ports
//! - Link-time collection of node descriptors via `inventory`
//! - A registry mapping node type strings to metadata and executors
//! - The shared context key convention used by graph-flow tasks
//!
//! # Example
//!
//! ```ignore
//! use node_engine::{Context, NodeRegistry};
//!
//! let registry = NodeRegistry::with_builtins();
//! for meta in registry.all_metadata() {
//!     println!("{} ({} inputs)", meta.label, meta.inputs.len());
//! }
//! ```

pub mod descriptor;
pub mod error;
pub mod keys;
pub mod registry;
pub mod types;

// Re-export key types
pub use descriptor::{DescriptorFn, PortMetadata, TaskDescriptor, TaskMetadata};
pub use error::{NodeEngineError, Result};
pub use keys::ContextKeys;
pub use registry::{NodeExecutor, NodeExecutorFactory, NodeRegistry, PortMap};
pub use types::{ExecutionMode, NodeCategory, PortDataType, PortId};

// Re-export graph-flow types that consumers will need
pub use graph_flow::{Context, GraphError, NextAction, Task, TaskResult};
