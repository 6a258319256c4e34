//! Pipe Edit Task
//!
//! Extends an existing pipe with new slots and lets individual incoming
//! slots be replaced, keeping everything else the pipe carries.

use async_trait::async_trait;
use graph_flow::{Context, NextAction, Task, TaskResult};
use node_engine::{
    ContextKeys, ExecutionMode, NodeCategory, NodeEngineError, NodeExecutor, PortDataType,
    PortMap, PortMetadata, TaskDescriptor, TaskMetadata,
};
use serde_json::Value;

use super::ports::{self, DATA_KEY, INCOMING_SLOT_PREFIX, PORT_PIPE, SLOT_PREFIX};
use crate::config::{self, PipeEditConfig};
use crate::pipe::{edit, EditRequest, Pipe, PipeLayout, SlotInputs, MAX_SLOTS};

/// Pipe Edit Task
///
/// # Inputs (from context)
/// - `{task_id}.input.pipe` (required) - The incoming pipe
/// - `{task_id}.input.incoming_slot_{i}` (optional) - Replacement for incoming slot `i`
/// - `{task_id}.input.slot_{i}` (optional) - Value for appended slot `i`
///
/// # Node Data
/// - `{task_id}.meta.config` - [`PipeEditConfig`]
///
/// # Outputs (to context)
/// - `{task_id}.output.pipe` - The edited pipe
#[derive(Clone)]
pub struct PipeEditTask {
    /// Unique identifier for this task instance
    task_id: String,
    /// Configuration
    config: Option<PipeEditConfig>,
}

impl PipeEditTask {
    /// Node type string
    pub const NODE_TYPE: &'static str = "pipe-edit";

    /// Create a new pipe-edit task
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            config: None,
        }
    }

    /// Create with configuration
    pub fn with_config(task_id: impl Into<String>, config: PipeEditConfig) -> Self {
        Self {
            task_id: task_id.into(),
            config: Some(config),
        }
    }

    /// Get the task ID
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn evaluate(
        config: &PipeEditConfig,
        pipe: &Pipe,
        overrides: SlotInputs,
        new_slots: SlotInputs,
    ) -> Pipe {
        let request = EditRequest {
            slot_count: config.slot_count,
            names: config.slot_names.clone(),
            incoming_slot_count: config.incoming_slot_count,
            overrides,
            new_slots,
        };
        edit(pipe, &request)
    }

    /// Metadata showing override sockets for `incoming` then the appended sockets
    pub fn descriptor_for_layout(incoming: &PipeLayout, appended: &PipeLayout) -> TaskMetadata {
        let mut inputs = vec![PortMetadata::required(PORT_PIPE, "pipe", PortDataType::Pipe)];
        inputs.extend(ports::slot_ports(
            INCOMING_SLOT_PREFIX,
            incoming.exposed_count(),
            incoming,
        ));
        inputs.extend(ports::slot_ports(SLOT_PREFIX, appended.exposed_count(), appended));

        TaskMetadata {
            inputs,
            ..Self::descriptor()
        }
    }

    /// Appended-slot sockets a host should currently show for this task
    pub async fn current_layout(&self, context: &Context) -> PipeLayout {
        config::resolve(self.config.as_ref(), context, &self.task_id)
            .await
            .appended_layout()
    }
}

impl TaskDescriptor for PipeEditTask {
    fn descriptor() -> TaskMetadata {
        let all = PipeLayout::new(MAX_SLOTS, Default::default());
        let mut inputs = vec![PortMetadata::required(PORT_PIPE, "pipe", PortDataType::Pipe)];
        inputs.extend(ports::slot_ports(INCOMING_SLOT_PREFIX, MAX_SLOTS, &all));
        inputs.extend(ports::slot_ports(SLOT_PREFIX, MAX_SLOTS, &all));

        TaskMetadata {
            node_type: Self::NODE_TYPE.to_string(),
            category: NodeCategory::Utility,
            label: "Friendly Pipe Edit".to_string(),
            description: "Adds slots to a friendly pipe or replaces existing ones".to_string(),
            inputs,
            outputs: vec![PortMetadata::optional(PORT_PIPE, "pipe", PortDataType::Pipe)],
            execution_mode: ExecutionMode::Reactive,
        }
    }
}

inventory::submit!(node_engine::DescriptorFn(PipeEditTask::descriptor));

#[async_trait]
impl Task for PipeEditTask {
    fn id(&self) -> &str {
        &self.task_id
    }

    async fn run(&self, context: Context) -> graph_flow::Result<TaskResult> {
        // Get required input: pipe
        let pipe_key = ContextKeys::input(&self.task_id, PORT_PIPE);
        let raw: Value = context
            .get(&pipe_key)
            .await
            .ok_or_else(|| NodeEngineError::MissingInput(pipe_key.clone()).into_graph_error())?;
        let pipe = Pipe::from_value(raw);

        let config = config::resolve(self.config.as_ref(), &context, &self.task_id).await;
        let overrides =
            ports::slot_inputs_from_context(&context, &self.task_id, INCOMING_SLOT_PREFIX).await;
        let new_slots = ports::slot_inputs_from_context(&context, &self.task_id, SLOT_PREFIX).await;

        let edited = Self::evaluate(&config, &pipe, overrides, new_slots);

        log::debug!(
            "PipeEditTask {}: {} -> {} slots",
            self.task_id,
            pipe.slot_count(),
            edited.slot_count()
        );

        let output_key = ContextKeys::output(&self.task_id, PORT_PIPE);
        context.set(&output_key, edited).await;

        Ok(TaskResult::new(None, NextAction::Continue))
    }
}

/// Registry executor for `pipe-edit`
pub struct PipeEditExecutor;

#[async_trait]
impl NodeExecutor for PipeEditExecutor {
    async fn execute(
        &self,
        task_id: &str,
        mut inputs: PortMap,
        _context: &Context,
    ) -> node_engine::Result<PortMap> {
        let raw = inputs
            .remove(PORT_PIPE)
            .ok_or_else(|| NodeEngineError::MissingInput(PORT_PIPE.to_string()))?;
        let pipe = Pipe::from_value(raw);

        let config: PipeEditConfig = config::from_node_data(inputs.get(DATA_KEY));
        let overrides = ports::slot_inputs_from_ports(&inputs, INCOMING_SLOT_PREFIX);
        let new_slots = ports::slot_inputs_from_ports(&inputs, SLOT_PREFIX);

        let edited = PipeEditTask::evaluate(&config, &pipe, overrides, new_slots);
        log::debug!(
            "PipeEditExecutor {}: {} -> {} slots",
            task_id,
            pipe.slot_count(),
            edited.slot_count()
        );

        let mut outputs = PortMap::new();
        outputs.insert(PORT_PIPE.to_string(), serde_json::to_value(&edited)?);
        Ok(outputs)
    }
}
