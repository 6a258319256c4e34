//! Task descriptor trait and metadata types
//!
//! This module provides the `TaskDescriptor` trait that allows tasks to
//! self-describe their metadata (ports, category, label, etc.).
//!
//! The task implementation defines both its behavior AND its metadata, and
//! registers the latter at link time with `inventory`:
//!
//! ```ignore
//! inventory::submit!(node_engine::DescriptorFn(PipeInTask::descriptor));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{ExecutionMode, NodeCategory, PortDataType};

/// Trait for tasks that can describe their metadata
///
/// Implementing this trait allows a task to provide its metadata
/// for UI rendering and validation without requiring a separate
/// definition in a registry.
pub trait TaskDescriptor {
    /// Get the static metadata for this task type
    fn descriptor() -> TaskMetadata
    where
        Self: Sized;
}

/// Link-time registration of a task descriptor.
///
/// Collected by [`NodeRegistry::with_builtins`](crate::NodeRegistry::with_builtins).
pub struct DescriptorFn(pub fn() -> TaskMetadata);

inventory::collect!(DescriptorFn);

/// Complete metadata for a task type
///
/// This describes everything needed to render a node in the UI
/// and validate connections between nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// Unique type identifier (e.g., "pipe-in")
    pub node_type: String,
    /// Category for UI grouping
    pub category: NodeCategory,
    /// Human-readable label
    pub label: String,
    /// Description of what the task does
    pub description: String,
    /// Input port definitions
    pub inputs: Vec<PortMetadata>,
    /// Output port definitions
    pub outputs: Vec<PortMetadata>,
    /// Execution mode
    pub execution_mode: ExecutionMode,
}

impl TaskMetadata {
    /// Find an input port by id
    pub fn input(&self, id: &str) -> Option<&PortMetadata> {
        self.inputs.iter().find(|p| p.id == id)
    }

    /// Find an output port by id
    pub fn output(&self, id: &str) -> Option<&PortMetadata> {
        self.outputs.iter().find(|p| p.id == id)
    }
}

/// Metadata for a port (input or output)
///
/// Describes a single port on a node, including its data type
/// and connection constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMetadata {
    /// Port identifier (used in context keys)
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Data type
    pub data_type: PortDataType,
    /// Whether this input is required
    pub required: bool,
    /// Whether multiple connections are allowed
    pub multiple: bool,
}

impl PortMetadata {
    /// Create a new port metadata
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        data_type: PortDataType,
        required: bool,
        multiple: bool,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data_type,
            required,
            multiple,
        }
    }

    /// Create a required port
    pub fn required(
        id: impl Into<String>,
        label: impl Into<String>,
        data_type: PortDataType,
    ) -> Self {
        Self::new(id, label, data_type, true, false)
    }

    /// Create an optional port
    pub fn optional(
        id: impl Into<String>,
        label: impl Into<String>,
        data_type: PortDataType,
    ) -> Self {
        Self::new(id, label, data_type, false, false)
    }

    /// Set this port to accept multiple connections
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}
