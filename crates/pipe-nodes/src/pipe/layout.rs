//! Socket layout of pipe nodes
//!
//! Pipe nodes declare [`MAX_SLOTS`] sockets per slot group, but a host only
//! shows as many as the pipe declares, labelled with the slot names.

use super::{effective_incoming_count, Pipe, SlotIndex, SlotNames, MAX_SLOTS};

/// Label used for a slot without a name
pub fn default_label(index: SlotIndex) -> String {
    format!("slot_{}", index)
}

/// How many slot sockets to show and what to call them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeLayout {
    pub slot_count: usize,
    pub names: SlotNames,
}

impl PipeLayout {
    pub fn new(slot_count: usize, names: SlotNames) -> Self {
        Self { slot_count, names }
    }

    /// Layout a consumer of `pipe` should expose
    pub fn of_pipe(pipe: &Pipe) -> Self {
        Self {
            slot_count: effective_incoming_count(pipe, 0),
            names: pipe.names().clone(),
        }
    }

    /// Sockets shown by a bundler or unbundler: always at least one
    pub fn visible_count(&self) -> usize {
        self.slot_count.clamp(1, MAX_SLOTS)
    }

    /// Sockets shown for an optional slot group, which may be empty
    pub fn exposed_count(&self) -> usize {
        self.slot_count.min(MAX_SLOTS)
    }

    pub fn label(&self, index: SlotIndex) -> String {
        self.names
            .get(&index)
            .cloned()
            .unwrap_or_else(|| default_label(index))
    }

    /// Labels for the visible sockets, in order
    pub fn labels(&self) -> Vec<String> {
        (1..=self.visible_count()).map(|i| self.label(i)).collect()
    }
}
