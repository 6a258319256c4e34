//! Registry setup for host applications.
//!
//! Hosts call [`register_pipe_nodes`] at startup to make the pipe nodes
//! available for dispatch by node type, or take a ready [`registry`].

use std::sync::Arc;

use node_engine::{NodeRegistry, TaskDescriptor};

use crate::nodes::{
    PipeEditExecutor, PipeEditTask, PipeInExecutor, PipeInTask, PipeOutExecutor, PipeOutTask,
};

/// Register metadata and executors for `pipe-in`, `pipe-out` and `pipe-edit`
///
/// # Example
///
/// ```ignore
/// let mut registry = node_engine::NodeRegistry::new();
/// pipe_nodes::register_pipe_nodes(&mut registry);
/// let outputs = registry.execute("pipe-in-1", inputs, &context).await?;
/// ```
pub fn register_pipe_nodes(registry: &mut NodeRegistry) {
    registry.register_executor(PipeInTask::descriptor(), Arc::new(PipeInExecutor));
    registry.register_executor(PipeOutTask::descriptor(), Arc::new(PipeOutExecutor));
    registry.register_executor(PipeEditTask::descriptor(), Arc::new(PipeEditExecutor));
    log::debug!("Registered pipe nodes");
}

/// A registry holding only the pipe nodes
pub fn registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    register_pipe_nodes(&mut registry);
    registry
}
