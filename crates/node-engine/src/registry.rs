//! Node type registry for dynamic node resolution
//!
//! This module provides a registry that maps node type strings to executors
//! and metadata, so a host can list the available nodes and invoke one by
//! its type string.
//!
//! # Usage
//!
//! ```ignore
//! use node_engine::{NodeRegistry, TaskDescriptor};
//!
//! let mut registry = NodeRegistry::new();
//! registry.register_executor(MyTask::descriptor(), Arc::new(MyExecutor));
//!
//! let outputs = registry.execute("my-task-1", inputs, &context).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use graph_flow::Context;

use crate::descriptor::{DescriptorFn, TaskMetadata};
use crate::error::{NodeEngineError, Result};

/// Port id → value map exchanged with executors
pub type PortMap = HashMap<String, serde_json::Value>;

/// Per-node-type executor
///
/// A `NodeExecutor` handles exactly one node type. The `_data` entry of
/// `inputs` carries the node instance configuration.
#[async_trait]
pub trait NodeExecutor: Send + Sync {
    /// Execute this node type with the given inputs
    async fn execute(&self, task_id: &str, inputs: PortMap, context: &Context) -> Result<PortMap>;
}

/// Factory for creating or returning a shared NodeExecutor
pub trait NodeExecutorFactory: Send + Sync {
    fn create_executor(&self) -> Arc<dyn NodeExecutor>;
}

/// A registration entry combining metadata with an optional executor factory
struct RegistryEntry {
    metadata: TaskMetadata,
    factory: Option<Arc<dyn NodeExecutorFactory>>,
}

/// Registry of node types with their metadata and executors
///
/// This is the central registry that maps node_type strings to:
/// 1. Metadata (ports, category, label) from TaskDescriptor
/// 2. Executor factories that create per-node executors
pub struct NodeRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry holding the metadata of every linked-in descriptor
    ///
    /// Descriptors are collected from `inventory::submit!(DescriptorFn(..))`
    /// registrations; executors are not attached.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in inventory::iter::<DescriptorFn> {
            registry.register_metadata((descriptor.0)());
        }
        registry
    }

    /// Register a node type with metadata and an executor factory
    pub fn register(&mut self, metadata: TaskMetadata, factory: Arc<dyn NodeExecutorFactory>) {
        self.entries.insert(
            metadata.node_type.clone(),
            RegistryEntry {
                metadata,
                factory: Some(factory),
            },
        );
    }

    /// Register a node type backed by one shared executor instance
    pub fn register_executor(&mut self, metadata: TaskMetadata, executor: Arc<dyn NodeExecutor>) {
        self.register(metadata, Arc::new(SharedExecutorFactory { executor }));
    }

    /// Register a node type with metadata only (no executor)
    ///
    /// Used for metadata-only registrations (e.g., UI palette listing).
    pub fn register_metadata(&mut self, metadata: TaskMetadata) {
        self.entries.insert(
            metadata.node_type.clone(),
            RegistryEntry {
                metadata,
                factory: None,
            },
        );
    }

    /// Get metadata for a node type
    pub fn get_metadata(&self, node_type: &str) -> Option<&TaskMetadata> {
        self.entries.get(node_type).map(|e| &e.metadata)
    }

    /// Get all registered metadata
    pub fn all_metadata(&self) -> Vec<&TaskMetadata> {
        self.entries.values().map(|e| &e.metadata).collect()
    }

    /// Get the executor for a node type
    pub fn get_executor(&self, node_type: &str) -> Option<Arc<dyn NodeExecutor>> {
        self.entries
            .get(node_type)
            .and_then(|e| e.factory.as_ref())
            .map(|f| f.create_executor())
    }

    /// Check if a node type is registered
    pub fn has_node_type(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    /// List all registered node type strings
    pub fn node_types(&self) -> Vec<&str> {
        self.entries.keys().map(|s| s.as_str()).collect()
    }

    /// Dispatch a node invocation by type
    ///
    /// The node type is read from `inputs._data.node_type`. Without it, the
    /// type is inferred from the task id (e.g. `"pipe-in-1"` -> `"pipe-in"`).
    pub async fn execute(&self, task_id: &str, inputs: PortMap, context: &Context) -> Result<PortMap> {
        let node_type = inputs
            .get("_data")
            .and_then(|d| d.get("node_type"))
            .and_then(|t| t.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| node_type_from_task_id(task_id));

        let executor = self.get_executor(&node_type).ok_or_else(|| {
            NodeEngineError::UnknownNodeType {
                node_type: node_type.clone(),
                task_id: task_id.to_string(),
            }
        })?;

        log::debug!("Dispatching {} to '{}' executor", task_id, node_type);
        executor.execute(task_id, inputs, context).await
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn node_type_from_task_id(task_id: &str) -> String {
    match task_id.rsplit_once('-') {
        Some((prefix, suffix)) if suffix.chars().all(|c| c.is_ascii_digit()) => prefix.to_string(),
        _ => task_id.to_string(),
    }
}

/// Factory that returns a shared executor instance
struct SharedExecutorFactory {
    executor: Arc<dyn NodeExecutor>,
}

impl NodeExecutorFactory for SharedExecutorFactory {
    fn create_executor(&self) -> Arc<dyn NodeExecutor> {
        self.executor.clone()
    }
}
