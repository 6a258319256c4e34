//! Context key conventions
//!
//! Tasks communicate via the shared graph-flow `Context`, storing inputs
//! and outputs under well-defined key patterns.
//!
//! # Key Conventions
//!
//! - Inputs: `{task_id}.input.{port_name}`
//! - Outputs: `{task_id}.output.{port_name}`
//! - Node configuration: `{task_id}.meta.{field}`
//!
//! # Example
//!
//! ```ignore
//! // Wire a value into slot 3 of a bundler
//! context.set(ContextKeys::input("pipe_in_1", "slot_3"), json!(42)).await;
//!
//! // After execution, read the bundled pipe
//! let pipe: Option<Pipe> = context.get(&ContextKeys::output("pipe_in_1", "pipe")).await;
//! ```

/// Helper for building context keys
pub struct ContextKeys;

impl ContextKeys {
    /// Build an input key: `{task_id}.input.{port}`
    pub fn input(task_id: &str, port: &str) -> String {
        format!("{}.input.{}", task_id, port)
    }

    /// Build an output key: `{task_id}.output.{port}`
    pub fn output(task_id: &str, port: &str) -> String {
        format!("{}.output.{}", task_id, port)
    }

    /// Build a metadata key: `{task_id}.meta.{field}`
    pub fn meta(task_id: &str, field: &str) -> String {
        format!("{}.meta.{}", task_id, field)
    }
}
