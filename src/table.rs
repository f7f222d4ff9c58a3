//! Table: fixed-size array of chain heads plus its growth parameters.
//!
//! A `Table` is a snapshot of (heads, threshold, load factor, growth limit);
//! capacity is the head count. Resizing never edits a table in place: the growth controller
//! builds a new one and swaps it in whole.

use crate::chain::{self, ChainIter};
use crate::config::MAX_CAPACITY;
use crate::entry::{Arena, EntryId};
use crate::growth;
use core::borrow::Borrow;

#[derive(Debug)]
pub(crate) struct Table {
    heads: Box<[Option<EntryId>]>,
    threshold: usize,
    load_factor: f32,
    max_capacity: usize,
}

impl Table {
    #[cfg(test)]
    pub(crate) fn new(capacity: usize, load_factor: f32) -> Self {
        Self::with_max_capacity(capacity, load_factor, MAX_CAPACITY)
    }

    /// `capacity` must be positive and at most `max_capacity`; callers
    /// validate through `Config`.
    pub(crate) fn with_max_capacity(capacity: usize, load_factor: f32, max_capacity: usize) -> Self {
        let max_capacity = max_capacity.clamp(1, MAX_CAPACITY);
        let capacity = capacity.clamp(1, max_capacity);
        Self {
            heads: vec![None; capacity].into_boxed_slice(),
            threshold: growth::threshold_for(capacity, load_factor),
            load_factor,
            max_capacity,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.heads.len()
    }

    #[inline]
    pub(crate) fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    pub(crate) fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[inline]
    pub(crate) fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// `hash mod capacity`.
    #[inline]
    pub(crate) fn slot_for(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    #[inline]
    fn head_for(&self, hash: u64) -> Option<EntryId> {
        self.heads.get(self.slot_for(hash)).copied().flatten()
    }

    pub(crate) fn find<K, V, Q>(&self, arena: &Arena<K, V>, hash: u64, q: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        chain::find(arena, self.head_for(hash), hash, q)
    }

    pub(crate) fn contains<K, V, Q>(&self, arena: &Arena<K, V>, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.find(arena, hash, q).is_some()
    }

    /// Every chain, not only the first occupied one.
    pub(crate) fn contains_value<K, V>(&self, arena: &Arena<K, V>, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.heads
            .iter()
            .any(|&head| ChainIter::new(arena, head).any(|(_, v)| v == value))
    }

    /// Append an arena entry to the chain its hash selects.
    pub(crate) fn link<K, V>(&mut self, arena: &mut Arena<K, V>, hash: u64, id: EntryId) {
        let slot = self.slot_for(hash);
        if let Some(head) = self.heads.get_mut(slot) {
            chain::append(arena, head, id);
        }
    }

    /// Link `(id, hash)` pairs in order, each at the tail of its chain. Tails
    /// are tracked per slot, so each link is O(1) however long the chain.
    /// Meant for a freshly built table; returns the number linked.
    pub(crate) fn link_all<K, V, I>(&mut self, arena: &mut Arena<K, V>, entries: I) -> usize
    where
        I: IntoIterator<Item = (EntryId, u64)>,
    {
        let mut tails: Vec<Option<EntryId>> = vec![None; self.heads.len()];
        let mut linked = 0;
        for (id, hash) in entries {
            let slot = self.slot_for(hash);
            if let (Some(head), Some(tail)) = (self.heads.get_mut(slot), tails.get_mut(slot)) {
                chain::push_back(arena, head, tail, id);
                linked += 1;
            }
        }
        linked
    }

    /// Splice the matching entry out of its chain. The entry itself is left in
    /// the arena for the caller to take.
    pub(crate) fn unlink<K, V, Q>(&mut self, arena: &mut Arena<K, V>, hash: u64, q: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let slot = self.slot_for(hash);
        let head = self.heads.get_mut(slot)?;
        let found = chain::find_with_prev(arena, *head, hash, q)?;
        chain::splice_out(arena, head, found);
        Some(found.target)
    }

    pub(crate) fn clear(&mut self) {
        self.heads.iter_mut().for_each(|h| *h = None);
    }

    /// Chain heads in slot order.
    pub(crate) fn heads(&self) -> impl Iterator<Item = Option<EntryId>> + '_ {
        self.heads.iter().copied()
    }

    pub(crate) fn chain<'a, K, V>(&self, arena: &'a Arena<K, V>, slot: usize) -> ChainIter<'a, K, V> {
        ChainIter::new(arena, self.heads.get(slot).copied().flatten())
    }
}
