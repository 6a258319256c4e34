//! Pipe data model
//!
//! A [`Pipe`] bundles many independently wired values into one value that
//! travels along a single edge of the node graph. Slots are addressed by a
//! 1-based index; both the value map and the name map are sparse.
//!
//! The operations over pipes are pure functions in the submodules:
//!
//! - [`bundle`](bundle::bundle): discrete inputs → new pipe
//! - [`unbundle`](unbundle::unbundle): pipe → fixed list of [`MAX_SLOTS`] outputs
//! - [`edit`](edit::edit): pipe + overrides + appended slots → new pipe

pub mod bundle;
pub mod edit;
pub mod layout;
pub mod names;
pub mod unbundle;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use bundle::bundle;
pub use edit::{edit, effective_incoming_count, EditRequest};
pub use layout::{default_label, PipeLayout};
pub use names::{normalize_slot_key, parse_slot_names, slot_names_from_value};
pub use unbundle::{unbundle, Unbundled};

/// Number of slot sockets a pipe node exposes
pub const MAX_SLOTS: usize = 80;

/// 1-based slot position
pub type SlotIndex = usize;

/// Opaque slot payload; pipe operations never inspect it
pub type SlotValue = Value;

/// Display names keyed by slot position
pub type SlotNames = BTreeMap<SlotIndex, String>;

/// Aggregate of named slot values passed between pipe nodes
///
/// Operations take a `&Pipe` and build a new one, so a pipe feeding several
/// downstream nodes is never changed by any of them.
///
/// Deserialization is lenient: string keys are normalised to indices,
/// unusable keys and non-string names are dropped, and missing fields are
/// empty. See [`Pipe::from_value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPipe")]
pub struct Pipe {
    slot_count: usize,
    slots: BTreeMap<SlotIndex, SlotValue>,
    names: SlotNames,
}

impl Pipe {
    /// Create an empty pipe declaring `slot_count` slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_count,
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(
        slot_count: usize,
        slots: BTreeMap<SlotIndex, SlotValue>,
        names: SlotNames,
    ) -> Self {
        Self {
            slot_count,
            slots,
            names,
        }
    }

    /// Add a slot value, raising `slot_count` to cover it
    ///
    /// Index 0 is not a slot position and is ignored.
    pub fn with_slot(mut self, index: SlotIndex, value: impl Into<SlotValue>) -> Self {
        if index >= 1 {
            self.slots.insert(index, value.into());
            self.slot_count = self.slot_count.max(index);
        }
        self
    }

    /// Add a display name for a slot
    pub fn with_name(mut self, index: SlotIndex, name: impl Into<String>) -> Self {
        if index >= 1 {
            self.names.insert(index, name.into());
        }
        self
    }

    /// Decode a pipe received from the host
    ///
    /// Never fails: a value that cannot be read as a pipe becomes an empty one.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<Pipe>(value) {
            Ok(pipe) => pipe,
            Err(e) => {
                log::warn!("Replacing malformed pipe value with an empty pipe: {}", e);
                Self::default()
            }
        }
    }

    /// Declared number of logical slots
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Populated slot values
    pub fn slots(&self) -> &BTreeMap<SlotIndex, SlotValue> {
        &self.slots
    }

    /// Assigned slot names
    pub fn names(&self) -> &SlotNames {
        &self.names
    }

    /// Value held at `index`, if any
    pub fn get(&self, index: SlotIndex) -> Option<&SlotValue> {
        self.slots.get(&index)
    }

    /// Name assigned to `index`, if any
    pub fn name(&self, index: SlotIndex) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    /// Display label for `index`: its name, or `slot_{index}`
    pub fn label(&self, index: SlotIndex) -> String {
        self.name(index)
            .map(str::to_string)
            .unwrap_or_else(|| default_label(index))
    }

    /// Highest populated slot index
    pub fn max_slot_index(&self) -> Option<SlotIndex> {
        self.slots.keys().next_back().copied()
    }

    /// Number of populated slots
    pub fn populated(&self) -> usize {
        self.slots.len()
    }
}

/// Wire shape accepted when decoding a pipe
#[derive(Deserialize)]
struct RawPipe {
    #[serde(default)]
    slot_count: Value,
    #[serde(default)]
    slots: Value,
    #[serde(default)]
    names: Value,
}

impl From<RawPipe> for Pipe {
    fn from(raw: RawPipe) -> Self {
        let slots = match raw.slots {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(key, value)| normalize_slot_key(&key).map(|index| (index, value)))
                .collect(),
            _ => BTreeMap::new(),
        };

        Self {
            slot_count: count_from_value(&raw.slot_count).unwrap_or(0),
            slots,
            names: slot_names_from_value(&raw.names),
        }
    }
}

/// Read a count from a number or numeric string; negatives clamp to 0
pub(crate) fn count_from_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                usize::try_from(u).ok()
            } else if let Some(i) = n.as_i64() {
                Some(if i < 0 { 0 } else { i as usize })
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| if f < 0.0 { 0 } else { f as usize })
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .map(|i| usize::try_from(i).unwrap_or(0)),
        _ => None,
    }
}

/// Sparse set of optional slot inputs, keyed by position
///
/// Only positions `1..=MAX_SLOTS` are kept. Inserting `null` is the same as
/// leaving the position unwired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotInputs {
    values: BTreeMap<SlotIndex, SlotValue>,
}

impl SlotInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value wired into `index`
    pub fn insert(&mut self, index: SlotIndex, value: SlotValue) {
        if !(1..=MAX_SLOTS).contains(&index) || value.is_null() {
            return;
        }
        self.values.insert(index, value);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, index: SlotIndex, value: impl Into<SlotValue>) -> Self {
        self.insert(index, value.into());
        self
    }

    pub fn get(&self, index: SlotIndex) -> Option<&SlotValue> {
        self.values.get(&index)
    }

    /// Supplied values in ascending position order
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &SlotValue)> + '_ {
        self.values.iter().map(|(index, value)| (*index, value))
    }

    /// Highest position that received a value
    pub fn highest(&self) -> Option<SlotIndex> {
        self.values.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(SlotIndex, SlotValue)> for SlotInputs {
    fn from_iter<I: IntoIterator<Item = (SlotIndex, SlotValue)>>(iter: I) -> Self {
        let mut inputs = Self::new();
        for (index, value) in iter {
            inputs.insert(index, value);
        }
        inputs
    }
}
