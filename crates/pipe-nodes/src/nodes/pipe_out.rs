//! Pipe Out Task
//!
//! Unpacks a pipe into 80 positional outputs. Output `slot_{i}` carries
//! slot `i` of the pipe, or `null` when the pipe has nothing there.

use async_trait::async_trait;
use graph_flow::{Context, NextAction, Task, TaskResult};
use node_engine::{
    ContextKeys, ExecutionMode, NodeCategory, NodeEngineError, NodeExecutor, PortDataType,
    PortMap, PortMetadata, TaskDescriptor, TaskMetadata,
};
use serde_json::Value;

use super::ports::{self, PORT_PIPE, SLOT_PREFIX};
use crate::config::{self, PipeOutConfig};
use crate::pipe::{unbundle, Pipe, PipeLayout, Unbundled, MAX_SLOTS};

/// Pipe Out Task
///
/// The configured slot count and names only shape the sockets a host
/// shows (see [`PipeOutTask::descriptor_for_layout`]); every output is
/// written regardless.
///
/// # Inputs (from context)
/// - `{task_id}.input.pipe` (required) - The pipe to unpack
///
/// # Outputs (to context)
/// - `{task_id}.output.slot_{i}` for i in 1..=80 - Slot value or `null`
#[derive(Clone)]
pub struct PipeOutTask {
    /// Unique identifier for this task instance
    task_id: String,
    /// Configuration
    config: Option<PipeOutConfig>,
}

impl PipeOutTask {
    /// Node type string
    pub const NODE_TYPE: &'static str = "pipe-out";

    /// Create a new pipe-out task
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            config: None,
        }
    }

    /// Create with configuration
    pub fn with_config(task_id: impl Into<String>, config: PipeOutConfig) -> Self {
        Self {
            task_id: task_id.into(),
            config: Some(config),
        }
    }

    /// Get the task ID
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn evaluate(pipe: &Pipe) -> Unbundled {
        unbundle(pipe)
    }

    /// Metadata showing only the sockets of `layout`
    pub fn descriptor_for_layout(layout: &PipeLayout) -> TaskMetadata {
        TaskMetadata {
            outputs: ports::slot_ports(SLOT_PREFIX, layout.visible_count(), layout),
            ..Self::descriptor()
        }
    }

    /// Sockets a host should currently show for this task
    pub async fn current_layout(&self, context: &Context) -> PipeLayout {
        config::resolve(self.config.as_ref(), context, &self.task_id)
            .await
            .layout()
    }
}

impl TaskDescriptor for PipeOutTask {
    fn descriptor() -> TaskMetadata {
        TaskMetadata {
            node_type: Self::NODE_TYPE.to_string(),
            category: NodeCategory::Utility,
            label: "Friendly Pipe Out".to_string(),
            description: "Unpacks a friendly pipe into individual outputs".to_string(),
            inputs: vec![PortMetadata::required(PORT_PIPE, "pipe", PortDataType::Pipe)],
            outputs: ports::slot_ports(SLOT_PREFIX, MAX_SLOTS, &PipeLayout::default()),
            execution_mode: ExecutionMode::Reactive,
        }
    }
}

inventory::submit!(node_engine::DescriptorFn(PipeOutTask::descriptor));

#[async_trait]
impl Task for PipeOutTask {
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

        let outputs = Self::evaluate(&pipe);
        for (offset, value) in outputs.into_iter().enumerate() {
            let key = ContextKeys::output(&self.task_id, &ports::slot_port(SLOT_PREFIX, offset + 1));
            context.set(&key, value.unwrap_or(Value::Null)).await;
        }

        log::debug!(
            "PipeOutTask {}: unpacked {} of {} declared slots",
            self.task_id,
            pipe.populated(),
            pipe.slot_count()
        );

        Ok(TaskResult::new(None, NextAction::Continue))
    }
}

/// Registry executor for `pipe-out`
pub struct PipeOutExecutor;

#[async_trait]
impl NodeExecutor for PipeOutExecutor {
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

        log::debug!(
            "PipeOutExecutor {}: unpacking {} slots",
            task_id,
            pipe.populated()
        );

        Ok(PipeOutTask::evaluate(&pipe)
            .into_iter()
            .enumerate()
            .map(|(offset, value)| {
                (
                    ports::slot_port(SLOT_PREFIX, offset + 1),
                    value.unwrap_or(Value::Null),
                )
            })
            .collect())
    }
}
