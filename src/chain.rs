//! Bucket chain: singly linked entries threaded through the arena by id.
//!
//! A chain is just its head (`Option<EntryId>`) plus the `next` links stored
//! in each entry. These helpers are the only code that reads or writes those
//! links, so the chain invariants live here:
//! - every id reachable from a head resolves in the arena;
//! - the last entry's `next` is `None`;
//! - an entry removed from a chain keeps no link into it.

use crate::entry::{Arena, Entry, EntryId};
use core::borrow::Borrow;

/// A chain match and the entry linking to it (`None` when it is the head).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Found {
    pub(crate) prev: Option<EntryId>,
    pub(crate) target: EntryId,
}

#[inline]
fn next_of<K, V>(arena: &Arena<K, V>, id: EntryId) -> Option<EntryId> {
    arena.get(id).and_then(|e| e.next)
}

/// First entry (in chain order) whose key matches.
pub(crate) fn find<K, V, Q>(
    arena: &Arena<K, V>,
    head: Option<EntryId>,
    hash: u64,
    q: &Q,
) -> Option<EntryId>
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    find_with_prev(arena, head, hash, q).map(|f| f.target)
}

/// Like [`find`], also reporting the predecessor needed for splicing.
pub(crate) fn find_with_prev<K, V, Q>(
    arena: &Arena<K, V>,
    head: Option<EntryId>,
    hash: u64,
    q: &Q,
) -> Option<Found>
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    let mut prev = None;
    let mut cur = head;
    while let Some(id) = cur {
        let entry = arena.get(id)?;
        if entry.matches(hash, q) {
            return Some(Found { prev, target: id });
        }
        prev = Some(id);
        cur = entry.next;
    }
    None
}

/// Link `id` at the tail of the chain rooted at `head`.
pub(crate) fn append<K, V>(arena: &mut Arena<K, V>, head: &mut Option<EntryId>, id: EntryId) {
    if let Some(e) = arena.get_mut(id) {
        e.next = None;
    }
    let Some(first) = *head else {
        *head = Some(id);
        return;
    };
    let mut tail = first;
    while let Some(next) = next_of(arena, tail) {
        tail = next;
    }
    if let Some(e) = arena.get_mut(tail) {
        e.next = Some(id);
    }
}

/// Link `id` after `tail` in O(1) and make it the new tail. `tail` must be
/// the last entry of the chain at `head`, or `None` for an empty chain.
pub(crate) fn push_back<K, V>(
    arena: &mut Arena<K, V>,
    head: &mut Option<EntryId>,
    tail: &mut Option<EntryId>,
    id: EntryId,
) {
    if let Some(e) = arena.get_mut(id) {
        e.next = None;
    }
    match *tail {
        None => *head = Some(id),
        Some(t) => {
            if let Some(e) = arena.get_mut(t) {
                e.next = Some(id);
            }
        }
    }
    *tail = Some(id);
}

/// Unlink `found.target`, relinking its predecessor (or the head) to its
/// successor. The target stays in the arena with `next` cleared.
pub(crate) fn splice_out<K, V>(arena: &mut Arena<K, V>, head: &mut Option<EntryId>, found: Found) {
    let next = arena.get_mut(found.target).and_then(|e| e.next.take());
    match found.prev {
        None => *head = next,
        Some(p) => {
            if let Some(e) = arena.get_mut(p) {
                e.next = next;
            }
        }
    }
}

/// Entries of one chain, in chain (insertion) order.
pub struct ChainIter<'a, K, V> {
    arena: &'a Arena<K, V>,
    cur: Option<EntryId>,
}

impl<'a, K, V> ChainIter<'a, K, V> {
    pub(crate) fn new(arena: &'a Arena<K, V>, head: Option<EntryId>) -> Self {
        Self { arena, cur: head }
    }

    pub(crate) fn entries(self) -> impl Iterator<Item = (EntryId, &'a Entry<K, V>)> {
        let arena = self.arena;
        let mut cur = self.cur;
        core::iter::from_fn(move || {
            let id = cur?;
            let e = arena.get(id)?;
            cur = e.next;
            Some((id, e))
        })
    }
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        let e = self.arena.get(id)?;
        self.cur = e.next;
        Some((&e.key, &e.value))
    }
}
