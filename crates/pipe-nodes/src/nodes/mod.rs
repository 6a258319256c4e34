//! Pipe nodes
//!
//! The three host-facing nodes: bundle into a pipe, unpack a pipe, and
//! edit a pipe in transit.

pub mod ports;

mod pipe_edit;
mod pipe_in;
mod pipe_out;

pub use pipe_edit::{PipeEditExecutor, PipeEditTask};
pub use pipe_in::{PipeInExecutor, PipeInTask};
pub use pipe_out::{PipeOutExecutor, PipeOutTask};
