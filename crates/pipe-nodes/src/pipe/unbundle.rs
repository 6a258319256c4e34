//! Projecting a pipe back onto positional outputs

use super::{Pipe, SlotValue, MAX_SLOTS};

/// One entry per output socket; entry `i` holds slot `i + 1`
pub type Unbundled = [Option<SlotValue>; MAX_SLOTS];

/// Read slots `1..=MAX_SLOTS` into a fixed-length output list
///
/// The length does not depend on how many slots the pipe declares, so a
/// consumer may wire any output. Missing slots come back as `None`.
pub fn unbundle(pipe: &Pipe) -> Unbundled {
    std::array::from_fn(|offset| pipe.get(offset + 1).cloned())
}
