//! Friendly Pipe Nodes
//!
//! Nodes that carry many values of any type along a single graph edge.
//!
//! - **Pipe In** (`pipe-in`): bundles up to 80 inputs and their names into a pipe
//! - **Pipe Out** (`pipe-out`): unpacks a pipe into 80 positional outputs
//! - **Pipe Edit** (`pipe-edit`): appends slots to a pipe or replaces existing ones
//!
//! The pipe operations themselves live in [`pipe`] as pure functions; the
//! [`nodes`] module adapts them to graph-flow tasks and registry executors.

pub mod config;
pub mod nodes;
pub mod pipe;
pub mod setup;

pub use config::{PipeEditConfig, PipeInConfig, PipeOutConfig};
pub use nodes::*;
pub use pipe::{Pipe, PipeLayout, SlotIndex, SlotInputs, SlotNames, SlotValue, MAX_SLOTS};
pub use setup::{register_pipe_nodes, registry};
