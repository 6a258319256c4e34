//! Bundling discrete inputs into a pipe

use std::collections::BTreeMap;

use super::{Pipe, SlotInputs, SlotNames, MAX_SLOTS};

/// Build a new pipe from wired slot inputs
///
/// `slot_count` and `names` are copied as given; `slot_count` is advisory
/// and not checked against the wired inputs. Every position in
/// `1..=MAX_SLOTS` that received a non-null value becomes a slot.
pub fn bundle(slot_count: usize, names: &SlotNames, inputs: &SlotInputs) -> Pipe {
    let slots: BTreeMap<_, _> = (1..=MAX_SLOTS)
        .filter_map(|index| inputs.get(index).map(|value| (index, value.clone())))
        .collect();

    log::debug!(
        "Bundled {} of {} declared slots ({} names)",
        slots.len(),
        slot_count,
        names.len()
    );

    Pipe::from_parts(slot_count, slots, names.clone())
}
