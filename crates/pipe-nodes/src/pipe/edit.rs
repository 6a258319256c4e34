//! Editing an existing pipe
//!
//! An edit keeps everything the incoming pipe carries, replaces selected
//! incoming slots, and appends a batch of new slots after the incoming ones.
//! Appended positions and names are relative to the batch (`1..`) and are
//! shifted by the effective incoming count when written.

use super::{Pipe, SlotIndex, SlotInputs, SlotNames};

/// Parameters of one edit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRequest {
    /// Declared number of appended slots
    pub slot_count: usize,
    /// Names for appended slots, keyed by batch-relative position
    pub names: SlotNames,
    /// Host hint for how many incoming slots exist
    pub incoming_slot_count: usize,
    /// Replacement values for incoming slots, keyed by absolute position.
    /// Positions above the effective incoming count are ignored.
    pub overrides: SlotInputs,
    /// Values for appended slots, keyed by batch-relative position
    pub new_slots: SlotInputs,
}

/// Number of leading positions that belong to the incoming pipe
///
/// The largest of the highest populated index, the pipe's own `slot_count`
/// and the caller's hint. Any one of them alone can under-report.
pub fn effective_incoming_count(pipe: &Pipe, hint: usize) -> usize {
    pipe.max_slot_index()
        .unwrap_or(0)
        .max(pipe.slot_count())
        .max(hint)
}

/// Build a new pipe from `pipe` with the overrides and appended slots applied
///
/// Overrides only apply to positions up to the effective incoming count.
/// An appended value at a position above `slot_count` is still written, and
/// the resulting `slot_count` grows to cover it. Appended slots and names
/// whose absolute position would overflow `usize` are dropped.
pub fn edit(pipe: &Pipe, request: &EditRequest) -> Pipe {
    let base = effective_incoming_count(pipe, request.incoming_slot_count);
    let mut slots = pipe.slots().clone();
    let mut names = pipe.names().clone();

    let mut overridden = 0;
    for (index, value) in request.overrides.iter() {
        if index > base {
            log::debug!(
                "Ignoring override for slot {} past incoming count {}",
                index,
                base
            );
            continue;
        }
        slots.insert(index, value.clone());
        overridden += 1;
    }

    let mut max_new_slot: SlotIndex = 0;
    for (index, value) in request.new_slots.iter() {
        let Some(absolute) = base.checked_add(index) else {
            log::debug!("Dropping appended slot {} past base {}", index, base);
            continue;
        };
        slots.insert(absolute, value.clone());
        max_new_slot = max_new_slot.max(index);
    }

    for (index, name) in &request.names {
        match base.checked_add(*index) {
            Some(absolute) => {
                names.insert(absolute, name.clone());
            }
            None => log::debug!("Dropping name for slot {} past base {}", index, base),
        }
    }

    let slot_count = base.saturating_add(request.slot_count.max(max_new_slot));

    log::debug!(
        "Edited pipe: incoming {}, {} overridden, {} appended, slot_count {}",
        base,
        overridden,
        request.new_slots.len(),
        slot_count
    );

    Pipe::from_parts(slot_count, slots, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::parse_slot_names;
    use serde_json::json;

    fn incoming() -> Pipe {
        Pipe::new(3)
            .with_slot(1, "model")
            .with_slot(3, "seed")
            .with_name(1, "Model")
            .with_name(3, "Seed")
    }

    #[test]
    fn test_effective_incoming_count_takes_largest_source() {
        let pipe = incoming();
        assert_eq!(effective_incoming_count(&pipe, 0), 3);
        assert_eq!(effective_incoming_count(&pipe, 7), 7);

        // Stale count field below the highest populated slot
        let stale = Pipe::from_value(json!({"slot_count": 1, "slots": {"4": "x"}}));
        assert_eq!(effective_incoming_count(&stale, 2), 4);

        // Declared but unpopulated slots still count
        assert_eq!(effective_incoming_count(&Pipe::new(5), 0), 5);
    }

    #[test]
    fn test_append_after_incoming() {
        let request = EditRequest {
            slot_count: 2,
            new_slots: SlotInputs::new().with(1, "vae").with(2, "clip"),
            ..EditRequest::default()
        };

        let result = edit(&incoming(), &request);

        assert_eq!(result.get(4), Some(&json!("vae")));
        assert_eq!(result.get(5), Some(&json!("clip")));
        assert_eq!(result.slot_count(), 5);
        assert_eq!(result.get(1), Some(&json!("model")));
    }

    #[test]
    fn test_override_replaces_in_place() {
        let request = EditRequest {
            overrides: SlotInputs::new().with(3, "new seed"),
            ..EditRequest::default()
        };

        let original = incoming();
        let result = edit(&original, &request);

        assert_eq!(result.get(3), Some(&json!("new seed")));
        assert_eq!(result.populated(), original.populated());
        assert_eq!(result.slot_count(), 3);
        // The incoming pipe is left as it was
        assert_eq!(original.get(3), Some(&json!("seed")));
    }

    #[test]
    fn test_override_can_fill_reserved_slot() {
        let request = EditRequest {
            overrides: SlotInputs::new().with(2, "filled"),
            ..EditRequest::default()
        };

        let result = edit(&incoming(), &request);
        assert_eq!(result.get(2), Some(&json!("filled")));
        assert_eq!(result.populated(), 3);
    }

    #[test]
    fn test_override_past_incoming_count_is_ignored() {
        let request = EditRequest {
            overrides: SlotInputs::new().with(9, "stray"),
            ..EditRequest::default()
        };

        let result = edit(&incoming(), &request);
        assert_eq!(result.get(9), None);
        assert_eq!(result, incoming());
    }

    #[test]
    fn test_override_within_hinted_count() {
        let request = EditRequest {
            incoming_slot_count: 6,
            overrides: SlotInputs::new().with(6, "late"),
            ..EditRequest::default()
        };

        let result = edit(&incoming(), &request);
        assert_eq!(result.get(6), Some(&json!("late")));
        assert_eq!(result.slot_count(), 6);
    }

    #[test]
    fn test_names_are_offset() {
        let pipe = Pipe::new(5);
        let request = EditRequest {
            slot_count: 1,
            names: [(1, "Foo".to_string())].into_iter().collect(),
            ..EditRequest::default()
        };

        let result = edit(&pipe, &request);
        assert_eq!(result.name(6), Some("Foo"));
        assert_eq!(result.slot_count(), 6);
    }

    #[test]
    fn test_incoming_names_survive() {
        let request = EditRequest {
            slot_count: 1,
            names: [(1, "Vae".to_string())].into_iter().collect(),
            ..EditRequest::default()
        };

        let result = edit(&incoming(), &request);
        assert_eq!(result.name(1), Some("Model"));
        assert_eq!(result.name(3), Some("Seed"));
        assert_eq!(result.name(4), Some("Vae"));
    }

    #[test]
    fn test_slot_count_covers_value_past_declared_count() {
        let request = EditRequest {
            slot_count: 2,
            new_slots: SlotInputs::new().with(5, "gap"),
            ..EditRequest::default()
        };

        let result = edit(&incoming(), &request);
        assert_eq!(result.get(8), Some(&json!("gap")));
        assert_eq!(result.slot_count(), 8);
    }

    #[test]
    fn test_declared_count_reserves_empty_slots() {
        let request = EditRequest {
            slot_count: 4,
            new_slots: SlotInputs::new().with(1, "only"),
            ..EditRequest::default()
        };

        let result = edit(&incoming(), &request);
        assert_eq!(result.slot_count(), 7);
        assert_eq!(result.populated(), 3);
    }

    #[test]
    fn test_positions_past_usize_are_dropped() {
        let request = EditRequest {
            slot_count: 1,
            names: parse_slot_names(r#"{"18446744073709551615": "x", "1": "Kept"}"#),
            ..EditRequest::default()
        };
        let result = edit(&Pipe::new(1), &request);
        assert_eq!(result.name(2), Some("Kept"));
        assert_eq!(result.names().len(), 1);
        assert_eq!(result.slot_count(), 2);

        // Oversized count field saturates instead of wrapping
        let huge = Pipe::from_value(json!({"slot_count": 1e30, "slots": {"1": "a"}}));
        let request = EditRequest {
            slot_count: 1,
            new_slots: SlotInputs::new().with(1, "lost"),
            names: [(1, "Lost".to_string())].into_iter().collect(),
            ..EditRequest::default()
        };
        let result = edit(&huge, &request);
        assert_eq!(result.slot_count(), usize::MAX);
        assert_eq!(result.populated(), 1);
        assert!(result.names().is_empty());
    }

    #[test]
    fn test_noop_edit_is_identity() {
        let pipe = incoming();
        let result = edit(&pipe, &EditRequest::default());
        assert_eq!(result, pipe);
    }
}
