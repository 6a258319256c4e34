//! Error types for the node engine

use thiserror::Error;

/// Result type alias using NodeEngineError
pub type Result<T> = std::result::Result<T, NodeEngineError>;

/// Errors that can occur while dispatching or executing a node
#[derive(Debug, Error)]
pub enum NodeEngineError {
    /// Missing required input
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// No executor is registered for the requested node type
    #[error("Unknown node type '{node_type}' (task_id: '{task_id}')")]
    UnknownNodeType { node_type: String, task_id: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NodeEngineError {
    /// Convert into the error type graph-flow tasks return
    pub fn into_graph_error(self) -> graph_flow::GraphError {
        graph_flow::GraphError::TaskExecutionFailed(self.to_string())
    }
}
