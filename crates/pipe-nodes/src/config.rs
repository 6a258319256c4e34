//! Node configuration
//!
//! Each pipe node carries a small configuration (the host's hidden widget
//! values). It is read from the task itself, else from the context under
//! `{task_id}.meta.config`, else defaults. Deserialization never fails on
//! a bad field: the field takes its default instead.

use graph_flow::Context;
use node_engine::ContextKeys;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::pipe::{count_from_value, slot_names_from_value, PipeLayout, SlotNames};

/// Configuration for the pipe-in node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeInConfig {
    /// Declared number of active slots
    #[serde(deserialize_with = "count_or_one")]
    pub slot_count: usize,
    /// Slot display names
    #[serde(deserialize_with = "lenient_names")]
    pub slot_names: SlotNames,
}

impl Default for PipeInConfig {
    fn default() -> Self {
        Self {
            slot_count: 1,
            slot_names: SlotNames::new(),
        }
    }
}

/// Configuration for the pipe-out node
///
/// Only affects socket labels; the outputs themselves come from the pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeOutConfig {
    #[serde(deserialize_with = "count_or_one")]
    pub slot_count: usize,
    #[serde(deserialize_with = "lenient_names")]
    pub slot_names: SlotNames,
}

impl Default for PipeOutConfig {
    fn default() -> Self {
        Self {
            slot_count: 1,
            slot_names: SlotNames::new(),
        }
    }
}

impl PipeOutConfig {
    pub fn layout(&self) -> PipeLayout {
        PipeLayout::new(self.slot_count, self.slot_names.clone())
    }
}

/// Configuration for the pipe-edit node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeEditConfig {
    /// Number of slots to append
    #[serde(deserialize_with = "count_or_zero")]
    pub slot_count: usize,
    /// Names for appended slots, batch-relative
    #[serde(deserialize_with = "lenient_names")]
    pub slot_names: SlotNames,
    /// Host hint for how many incoming slots to expose for overrides
    #[serde(deserialize_with = "count_or_zero")]
    pub incoming_slot_count: usize,
}

impl PipeEditConfig {
    /// Layout of the appended slot group
    pub fn appended_layout(&self) -> PipeLayout {
        PipeLayout::new(self.slot_count, self.slot_names.clone())
    }
}

/// Decode a configuration from node data, falling back to defaults
pub fn from_node_data<T: DeserializeOwned + Default>(data: Option<&Value>) -> T {
    data.and_then(|d| serde_json::from_value(d.clone()).ok())
        .unwrap_or_default()
}

/// Resolve a task's configuration: its own, else the context's, else default
pub async fn resolve<T>(own: Option<&T>, context: &Context, task_id: &str) -> T
where
    T: DeserializeOwned + Default + Clone,
{
    if let Some(cfg) = own {
        return cfg.clone();
    }
    let config_key = ContextKeys::meta(task_id, "config");
    context.get::<T>(&config_key).await.unwrap_or_default()
}

fn count_or_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).unwrap_or(1))
}

fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).unwrap_or(0))
}

fn lenient_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SlotNames, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(slot_names_from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        assert_eq!(PipeInConfig::default().slot_count, 1);
        assert_eq!(PipeOutConfig::default().slot_count, 1);
        let edit = PipeEditConfig::default();
        assert_eq!(edit.slot_count, 0);
        assert_eq!(edit.incoming_slot_count, 0);
        assert!(edit.slot_names.is_empty());
    }

    #[test]
    fn test_names_accept_text_payload() {
        let config: PipeInConfig =
            serde_json::from_value(json!({"slot_count": 2, "slot_names": "{\"1\": \"Model\"}"}))
                .unwrap();
        assert_eq!(config.slot_count, 2);
        assert_eq!(config.slot_names[&1], "Model");
    }

    #[test]
    fn test_bad_fields_fall_back() {
        let config: PipeEditConfig = serde_json::from_value(json!({
            "slot_count": "lots",
            "slot_names": "not json",
            "incoming_slot_count": "4"
        }))
        .unwrap();
        assert_eq!(config.slot_count, 0);
        assert!(config.slot_names.is_empty());
        assert_eq!(config.incoming_slot_count, 4);
    }

    #[test]
    fn test_roundtrip_through_serialized_form() {
        let config = PipeEditConfig {
            slot_count: 2,
            slot_names: [(2, "Vae".to_string())].into_iter().collect(),
            incoming_slot_count: 3,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["slot_names"], json!({"2": "Vae"}));
        let decoded: PipeEditConfig = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_from_node_data_ignores_extra_fields() {
        let data = json!({"node_type": "pipe-in", "slot_count": 5});
        let config: PipeInConfig = from_node_data(Some(&data));
        assert_eq!(config.slot_count, 5);

        let missing: PipeInConfig = from_node_data(None);
        assert_eq!(missing, PipeInConfig::default());

        let not_object: PipeInConfig = from_node_data(Some(&json!("oops")));
        assert_eq!(not_object, PipeInConfig::default());
    }

    #[tokio::test]
    async fn test_resolve_prefers_own_then_context() {
        let context = Context::new();
        let stored = PipeOutConfig {
            slot_count: 4,
            slot_names: SlotNames::new(),
        };
        context.set(ContextKeys::meta("out_1", "config"), stored.clone()).await;

        let from_context: PipeOutConfig = resolve(None, &context, "out_1").await;
        assert_eq!(from_context, stored);

        let own = PipeOutConfig::default();
        let from_own: PipeOutConfig = resolve(Some(&own), &context, "out_1").await;
        assert_eq!(from_own, own);

        let fallback: PipeOutConfig = resolve(None, &context, "out_2").await;
        assert_eq!(fallback, PipeOutConfig::default());
    }
}
