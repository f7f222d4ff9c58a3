//! Entry: the key/value/hash triple stored in the arena, plus its chain link.

use core::borrow::Borrow;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable identity of an entry. Survives resizes; a removed entry's id
    /// never resolves again (generational keys).
    pub struct EntryId;
}

/// Backing storage for every live entry of one map.
pub(crate) type Arena<K, V> = SlotMap<EntryId, Entry<K, V>>;

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Full hash computed once at insertion; slots are derived from it.
    pub(crate) hash: u64,
    pub(crate) next: Option<EntryId>,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V, hash: u64) -> Self {
        Self {
            key,
            value,
            hash,
            next: None,
        }
    }

    /// Key match: stored hash first, then `Eq` on the key.
    #[inline]
    pub(crate) fn matches<Q>(&self, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.hash == hash && self.key.borrow() == q
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
