//! Slot naming payloads
//!
//! Names cross the host boundary as a JSON object keyed by slot position,
//! e.g. `{"1": "Model", "2": "Clip"}`. Hosts may hand over the raw text or an
//! already decoded object. A payload that cannot be read yields no names;
//! it is never an error.

use serde_json::{Map, Value};

use super::{SlotIndex, SlotNames};

/// Parse a slot key such as `"3"` or `" 3 "` into a slot index
///
/// Returns `None` for anything that is not a positive integer.
pub fn normalize_slot_key(key: &str) -> Option<SlotIndex> {
    let index: SlotIndex = key.trim().parse().ok()?;
    (index >= 1).then_some(index)
}

/// Parse a JSON naming payload
pub fn parse_slot_names(payload: &str) -> SlotNames {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(map)) => names_from_map(&map),
        Ok(other) => {
            log::debug!("Ignoring slot names payload that is not an object: {}", other);
            SlotNames::new()
        }
        Err(e) => {
            log::debug!("Ignoring unparseable slot names payload: {}", e);
            SlotNames::new()
        }
    }
}

/// Read slot names from either a JSON text payload or a decoded object
pub fn slot_names_from_value(value: &Value) -> SlotNames {
    match value {
        Value::String(payload) => parse_slot_names(payload),
        Value::Object(map) => names_from_map(map),
        _ => SlotNames::new(),
    }
}

fn names_from_map(map: &Map<String, Value>) -> SlotNames {
    map.iter()
        .filter_map(|(key, name)| {
            let index = normalize_slot_key(key)?;
            name.as_str().map(|name| (index, name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_slot_key() {
        assert_eq!(normalize_slot_key("1"), Some(1));
        assert_eq!(normalize_slot_key(" 42 "), Some(42));
        assert_eq!(normalize_slot_key("0"), None);
        assert_eq!(normalize_slot_key("-2"), None);
        assert_eq!(normalize_slot_key("slot_1"), None);
        assert_eq!(normalize_slot_key(""), None);
    }

    #[test]
    fn test_parse_slot_names() {
        let names = parse_slot_names(r#"{"1": "Model", "3": "Seed"}"#);
        assert_eq!(names.len(), 2);
        assert_eq!(names[&1], "Model");
        assert_eq!(names[&3], "Seed");
    }

    #[test]
    fn test_parse_malformed_payload_is_empty() {
        assert!(parse_slot_names("not json").is_empty());
        assert!(parse_slot_names("").is_empty());
        assert!(parse_slot_names("[\"a\", \"b\"]").is_empty());
        assert!(parse_slot_names("\"{}\"").is_empty());
    }

    #[test]
    fn test_bad_entries_are_dropped() {
        let names = parse_slot_names(r#"{"1": "ok", "two": "bad key", "3": 3, "4": null}"#);
        assert_eq!(names.len(), 1);
        assert_eq!(names[&1], "ok");
    }

    #[test]
    fn test_slot_names_from_value() {
        let from_text = slot_names_from_value(&json!("{\"2\": \"Clip\"}"));
        let from_object = slot_names_from_value(&json!({"2": "Clip"}));
        assert_eq!(from_text, from_object);
        assert_eq!(from_text[&2], "Clip");

        assert!(slot_names_from_value(&json!(null)).is_empty());
        assert!(slot_names_from_value(&json!(12)).is_empty());
    }
}
