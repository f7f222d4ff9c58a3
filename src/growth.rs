//! Growth controller: when to double, how far, and the rehash itself.
//!
//! Rehashing relinks arena entries into a freshly allocated `Table` using
//! each entry's stored hash. Entry ids do not change and no user code runs.
//! The new table is fully built before it replaces the old one, and every
//! allocation (the head array, the relink list and the per-slot tails)
//! happens before any link moves.

use crate::chain::ChainIter;
use crate::entry::{Arena, EntryId};
use crate::table::Table;

/// `floor(capacity * load_factor)`, computed in f64 to stay exact for every
/// capacity up to [`MAX_CAPACITY`](crate::MAX_CAPACITY).
pub(crate) fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    let t = (capacity as f64 * f64::from(load_factor)).floor();
    if t >= usize::MAX as f64 {
        usize::MAX
    } else {
        t as usize
    }
}

/// Doubled capacity, saturating at `max`. `None` once saturated.
pub(crate) fn next_capacity(capacity: usize, max: usize) -> Option<usize> {
    if capacity >= max {
        return None;
    }
    Some(capacity.saturating_mul(2).min(max))
}

/// A table holding `len` entries has outgrown its threshold.
#[inline]
pub(crate) fn needs_growth(table: &Table, len: usize) -> bool {
    len > table.threshold()
}

/// Outcome of a growth attempt, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Growth {
    Resized { from: usize, to: usize, moved: usize },
    Saturated,
}

/// Replace `table` with one of doubled capacity holding every live entry.
/// A table already at its growth limit is left as it is.
pub(crate) fn grow<K, V>(table: &mut Table, arena: &mut Arena<K, V>) -> Growth {
    let from = table.capacity();
    let Some(to) = next_capacity(from, table.max_capacity()) else {
        return Growth::Saturated;
    };
    let mut next = Table::with_max_capacity(to, table.load_factor(), table.max_capacity());

    // Collect in slot order so entries that land together keep their
    // relative order; `link_all` rewrites each entry's `next`, so no chain is
    // walked while it is being relinked.
    let mut pending: Vec<(EntryId, u64)> = Vec::with_capacity(arena.len());
    for head in table.heads() {
        pending.extend(ChainIter::new(arena, head).entries().map(|(id, e)| (id, e.hash)));
    }
    let moved = next.link_all(arena, pending);

    *table = next;
    Growth::Resized { from, to, moved }
}
