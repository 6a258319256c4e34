//! Port naming shared by the pipe nodes
//!
//! Slot sockets are named `slot_{i}`; the editor's override sockets for
//! incoming slots are named `incoming_slot_{i}`.

use graph_flow::Context;
use node_engine::{ContextKeys, PortDataType, PortMap, PortMetadata};

use crate::pipe::{PipeLayout, SlotIndex, SlotInputs, MAX_SLOTS};

/// Port carrying the pipe itself
pub const PORT_PIPE: &str = "pipe";
/// Prefix of slot sockets
pub const SLOT_PREFIX: &str = "slot_";
/// Prefix of the editor's incoming-slot override sockets
pub const INCOMING_SLOT_PREFIX: &str = "incoming_slot_";
/// Executor input holding node instance data
pub const DATA_KEY: &str = "_data";

pub fn slot_port(prefix: &str, index: SlotIndex) -> String {
    format!("{}{}", prefix, index)
}

/// Collect wired slot values from an executor port map
pub fn slot_inputs_from_ports(ports: &PortMap, prefix: &str) -> SlotInputs {
    (1..=MAX_SLOTS)
        .filter_map(|index| {
            ports
                .get(&slot_port(prefix, index))
                .map(|value| (index, value.clone()))
        })
        .collect()
}

/// Collect wired slot values from the task's context inputs
pub async fn slot_inputs_from_context(context: &Context, task_id: &str, prefix: &str) -> SlotInputs {
    let mut inputs = SlotInputs::new();
    for index in 1..=MAX_SLOTS {
        let key = ContextKeys::input(task_id, &slot_port(prefix, index));
        if let Some(value) = context.get::<serde_json::Value>(&key).await {
            inputs.insert(index, value);
        }
    }
    inputs
}

/// Declare `count` wildcard slot ports labelled from `layout`
pub fn slot_ports(prefix: &str, count: usize, layout: &PipeLayout) -> Vec<PortMetadata> {
    (1..=count.min(MAX_SLOTS))
        .map(|index| {
            PortMetadata::optional(slot_port(prefix, index), layout.label(index), PortDataType::Any)
        })
        .collect()
}
