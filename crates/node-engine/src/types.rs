//! Core types for node ports
//!
//! These types describe the data flowing through ports and how nodes are
//! grouped in the host palette.

use serde::{Deserialize, Serialize};

/// Unique identifier for a port
pub type PortId = String;

/// The data type of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDataType {
    /// Accepts any type
    Any,
    /// Text string
    String,
    /// Numeric value
    Number,
    /// JSON object
    Json,
    /// Bundled slot aggregate produced by pipe nodes
    Pipe,
}

impl PortDataType {
    /// Check if this type can connect to another type
    pub fn is_compatible_with(&self, other: &PortDataType) -> bool {
        // Any type is compatible with everything
        if matches!(self, PortDataType::Any) || matches!(other, PortDataType::Any) {
            return true;
        }

        // Exact type match
        self == other
    }
}

/// Category of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Input nodes (user input, file input, etc.)
    Input,
    /// Output nodes (display, export, etc.)
    Output,
    /// Processing nodes
    Processing,
    /// Plumbing nodes that reshape values between other nodes
    Utility,
}

/// Execution mode for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Execute once when inputs are available
    Batch,
    /// Execute reactively when inputs change
    Reactive,
}
