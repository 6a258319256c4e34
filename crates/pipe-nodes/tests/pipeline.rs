//! End-to-end pipe pipelines: pipe-in -> pipe-edit* -> pipe-out

use graph_flow::{Context, Task};
use node_engine::{ContextKeys, PortMap};
use pipe_nodes::pipe::{bundle, edit, parse_slot_names, unbundle, EditRequest};
use pipe_nodes::{
    registry, Pipe, PipeEditConfig, PipeEditTask, PipeInConfig, PipeInTask, PipeOutTask,
    SlotInputs, SlotNames, MAX_SLOTS,
};
use serde_json::{json, Value};

fn data(node_type: &str, fields: Value) -> Value {
    let mut data = json!({ "node_type": node_type });
    if let (Some(target), Value::Object(extra)) = (data.as_object_mut(), fields) {
        target.extend(extra);
    }
    data
}

#[test]
fn round_trip_every_position() {
    let inputs: SlotInputs = (1..=MAX_SLOTS)
        .map(|i| (i, json!({ "position": i })))
        .collect();

    let pipe = bundle(MAX_SLOTS, &SlotNames::new(), &inputs);
    let outputs = unbundle(&pipe);

    for (offset, value) in outputs.iter().enumerate() {
        assert_eq!(value.as_ref(), Some(&json!({ "position": offset + 1 })));
    }
}

#[test]
fn sparse_positions_survive_round_trip() {
    let inputs = SlotInputs::new().with(3, "c").with(17, 17.5).with(80, false);

    let pipe = bundle(3, &SlotNames::new(), &inputs);
    assert_eq!(pipe.slots().keys().copied().collect::<Vec<_>>(), vec![3, 17, 80]);

    let populated: Vec<usize> = unbundle(&pipe)
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_some())
        .map(|(offset, _)| offset + 1)
        .collect();
    assert_eq!(populated, vec![3, 17, 80]);
}

#[test]
fn chained_edits_keep_offsets_and_names() {
    let first = bundle(
        2,
        &parse_slot_names(r#"{"1": "Model", "2": "Clip"}"#),
        &SlotInputs::new().with(1, "model").with(2, "clip"),
    );

    let second = edit(
        &first,
        &EditRequest {
            slot_count: 1,
            names: parse_slot_names(r#"{"1": "Vae"}"#),
            new_slots: SlotInputs::new().with(1, "vae"),
            ..EditRequest::default()
        },
    );

    let third = edit(
        &second,
        &EditRequest {
            slot_count: 2,
            names: parse_slot_names(r#"{"2": "Seed"}"#),
            overrides: SlotInputs::new().with(1, "model v2"),
            new_slots: SlotInputs::new().with(1, "positive").with(2, 42),
            ..EditRequest::default()
        },
    );

    assert_eq!(third.slot_count(), 5);
    let labels: Vec<String> = (1..=5).map(|i| third.label(i)).collect();
    assert_eq!(labels, vec!["Model", "Clip", "Vae", "slot_4", "Seed"]);

    let outputs = unbundle(&third);
    assert_eq!(outputs[0], Some(json!("model v2")));
    assert_eq!(outputs[2], Some(json!("vae")));
    assert_eq!(outputs[4], Some(json!(42)));

    // Earlier pipes are untouched by later edits
    assert_eq!(first.get(1), Some(&json!("model")));
    assert_eq!(second.slot_count(), 3);
}

#[test]
fn malformed_names_never_fail() {
    let pipe = Pipe::new(2).with_slot(1, "a");
    let result = edit(
        &pipe,
        &EditRequest {
            slot_count: 1,
            names: parse_slot_names("not json"),
            ..EditRequest::default()
        },
    );
    assert!(result.names().is_empty());
    assert_eq!(result.slot_count(), 3);
}

#[test]
fn zero_slot_edit_is_identity_after_serialization() {
    let pipe = Pipe::new(4).with_slot(2, "two").with_name(4, "Four");
    let decoded = Pipe::from_value(serde_json::to_value(&pipe).unwrap());

    assert_eq!(edit(&decoded, &EditRequest::default()), pipe);
}

#[tokio::test]
async fn registry_dispatch_pipeline() {
    let registry = registry();
    let context = Context::new();

    let mut in_ports = PortMap::new();
    in_ports.insert(
        "_data".to_string(),
        data("pipe-in", json!({"slot_count": 2, "slot_names": "{\"1\": \"Prompt\"}"})),
    );
    in_ports.insert("slot_1".to_string(), json!("a cat"));
    in_ports.insert("slot_2".to_string(), json!(7));
    let bundled = registry.execute("pipe-in-1", in_ports, &context).await.unwrap();

    let mut edit_ports = PortMap::new();
    edit_ports.insert("_data".to_string(), data("pipe-edit", json!({"slot_count": 1})));
    edit_ports.insert("pipe".to_string(), bundled["pipe"].clone());
    edit_ports.insert("incoming_slot_2".to_string(), json!(8));
    edit_ports.insert("slot_1".to_string(), json!("a dog"));
    let edited = registry.execute("pipe-edit-1", edit_ports, &context).await.unwrap();

    let mut out_ports = PortMap::new();
    out_ports.insert("pipe".to_string(), edited["pipe"].clone());
    let outputs = registry.execute("pipe-out-1", out_ports, &context).await.unwrap();

    assert_eq!(outputs["slot_1"], json!("a cat"));
    assert_eq!(outputs["slot_2"], json!(8));
    assert_eq!(outputs["slot_3"], json!("a dog"));
    assert_eq!(outputs["slot_4"], Value::Null);
    assert_eq!(outputs.len(), MAX_SLOTS);
}

#[tokio::test]
async fn task_pipeline_through_context() {
    let context = Context::new();

    let pipe_in = PipeInTask::with_config(
        "in",
        PipeInConfig {
            slot_count: 1,
            slot_names: SlotNames::new(),
        },
    );
    context.set(ContextKeys::input("in", "slot_1"), json!("latent")).await;
    pipe_in.run(context.clone()).await.unwrap();

    // Host forwards the edge: in.output.pipe -> edit.input.pipe
    let bundled: Value = context.get(&ContextKeys::output("in", "pipe")).await.unwrap();
    context.set(ContextKeys::input("edit", "pipe"), bundled).await;

    let pipe_edit = PipeEditTask::with_config(
        "edit",
        PipeEditConfig {
            slot_count: 1,
            slot_names: parse_slot_names(r#"{"1": "Steps"}"#),
            incoming_slot_count: 1,
        },
    );
    context.set(ContextKeys::input("edit", "slot_1"), json!(30)).await;
    pipe_edit.run(context.clone()).await.unwrap();

    let edited: Value = context.get(&ContextKeys::output("edit", "pipe")).await.unwrap();
    assert_eq!(edited["names"], json!({"2": "Steps"}));
    context.set(ContextKeys::input("out", "pipe"), edited).await;

    PipeOutTask::new("out").run(context.clone()).await.unwrap();

    let steps: Option<Value> = context.get(&ContextKeys::output("out", "slot_2")).await;
    assert_eq!(steps, Some(json!(30)));
    let latent: Option<Value> = context.get(&ContextKeys::output("out", "slot_1")).await;
    assert_eq!(latent, Some(json!("latent")));
}
