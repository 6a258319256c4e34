//! Pipe In Task
//!
//! Bundles up to 80 wired inputs of any type into a single pipe value.
//! Slot names configured on the node travel inside the pipe.

use async_trait::async_trait;
use graph_flow::{Context, NextAction, Task, TaskResult};
use node_engine::{
    ContextKeys, ExecutionMode, NodeCategory, NodeExecutor, PortDataType, PortMap, PortMetadata,
    TaskDescriptor, TaskMetadata,
};

use super::ports::{self, DATA_KEY, PORT_PIPE, SLOT_PREFIX};
use crate::config::{self, PipeInConfig};
use crate::pipe::{bundle, Pipe, PipeLayout, SlotInputs, MAX_SLOTS};

/// Pipe In Task
///
/// # Inputs (from context)
/// - `{task_id}.input.slot_{i}` for i in 1..=80 (optional, any type)
///
/// # Node Data
/// - `{task_id}.meta.config` - [`PipeInConfig`] (slot count and names)
///
/// # Outputs (to context)
/// - `{task_id}.output.pipe` - The bundled pipe
#[derive(Clone)]
pub struct PipeInTask {
    /// Unique identifier for this task instance
    task_id: String,
    /// Configuration
    config: Option<PipeInConfig>,
}

impl PipeInTask {
    /// Node type string
    pub const NODE_TYPE: &'static str = "pipe-in";

    /// Create a new pipe-in task
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            config: None,
        }
    }

    /// Create with configuration
    pub fn with_config(task_id: impl Into<String>, config: PipeInConfig) -> Self {
        Self {
            task_id: task_id.into(),
            config: Some(config),
        }
    }

    /// Get the task ID
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Bundle the given inputs under `config`
    pub fn evaluate(config: &PipeInConfig, inputs: &SlotInputs) -> Pipe {
        bundle(config.slot_count, &config.slot_names, inputs)
    }

    /// Metadata showing only the sockets of `layout`
    pub fn descriptor_for_layout(layout: &PipeLayout) -> TaskMetadata {
        TaskMetadata {
            inputs: ports::slot_ports(SLOT_PREFIX, layout.visible_count(), layout),
            ..Self::descriptor()
        }
    }
}

impl TaskDescriptor for PipeInTask {
    fn descriptor() -> TaskMetadata {
        TaskMetadata {
            node_type: Self::NODE_TYPE.to_string(),
            category: NodeCategory::Utility,
            label: "Friendly Pipe In".to_string(),
            description: "Bundles any number of inputs into one named pipe".to_string(),
            inputs: ports::slot_ports(SLOT_PREFIX, MAX_SLOTS, &PipeLayout::default()),
            outputs: vec![PortMetadata::optional(PORT_PIPE, "pipe", PortDataType::Pipe)],
            execution_mode: ExecutionMode::Reactive,
        }
    }
}

inventory::submit!(node_engine::DescriptorFn(PipeInTask::descriptor));

#[async_trait]
impl Task for PipeInTask {
    fn id(&self) -> &str {
        &self.task_id
    }

    async fn run(&self, context: Context) -> graph_flow::Result<TaskResult> {
        let config = config::resolve(self.config.as_ref(), &context, &self.task_id).await;
        let inputs = ports::slot_inputs_from_context(&context, &self.task_id, SLOT_PREFIX).await;

        let pipe = Self::evaluate(&config, &inputs);

        log::debug!(
            "PipeInTask {}: bundled {} slots",
            self.task_id,
            pipe.populated()
        );

        let output_key = ContextKeys::output(&self.task_id, PORT_PIPE);
        context.set(&output_key, pipe).await;

        Ok(TaskResult::new(None, NextAction::Continue))
    }
}

/// Registry executor for `pipe-in`
pub struct PipeInExecutor;

#[async_trait]
impl NodeExecutor for PipeInExecutor {
    async fn execute(
        &self,
        task_id: &str,
        inputs: PortMap,
        _context: &Context,
    ) -> node_engine::Result<PortMap> {
        let config: PipeInConfig = config::from_node_data(inputs.get(DATA_KEY));
        let slots = ports::slot_inputs_from_ports(&inputs, SLOT_PREFIX);

        let pipe = PipeInTask::evaluate(&config, &slots);
        log::debug!("PipeInExecutor {}: bundled {} slots", task_id, pipe.populated());

        let mut outputs = PortMap::new();
        outputs.insert(PORT_PIPE.to_string(), serde_json::to_value(&pipe)?);
        Ok(outputs)
    }
}
