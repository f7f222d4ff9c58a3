//! Aggregate views: key set, value collection and entry set.
//!
//! The map keeps a dense list of live entry ids alongside the table and
//! updates it on every successful put, remove and clear. The view types are
//! thin borrows over that list, so reading a view never walks the buckets.
//! Resizing relinks entries without changing their ids, so it leaves the list
//! untouched.

use crate::chained_hash_map::ChainedHashMap;
use crate::entry::{Arena, EntryId};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use slotmap::SecondaryMap;

/// Dense, unordered list of live entry ids with O(1) insert and remove.
#[derive(Debug, Default)]
pub(crate) struct ViewIndex {
    ids: Vec<EntryId>,
    pos: SecondaryMap<EntryId, usize>,
}

impl ViewIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn ids(&self) -> &[EntryId] {
        &self.ids
    }

    pub(crate) fn insert(&mut self, id: EntryId) {
        if self.pos.contains_key(id) {
            return;
        }
        self.pos.insert(id, self.ids.len());
        self.ids.push(id);
    }

    /// Swap-remove; the moved id gets its position patched.
    pub(crate) fn remove(&mut self, id: EntryId) -> bool {
        let Some(at) = self.pos.remove(id) else {
            return false;
        };
        self.ids.swap_remove(at);
        if let Some(&moved) = self.ids.get(at) {
            self.pos.insert(moved, at);
        }
        true
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
        self.pos.clear();
    }
}

/// Iterator over `(&K, &V)` in view order.
pub struct Iter<'a, K, V> {
    ids: core::slice::Iter<'a, EntryId>,
    arena: &'a Arena<K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(ids: &'a [EntryId], arena: &'a Arena<K, V>) -> Self {
        Self {
            ids: ids.iter(),
            arena,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.ids.next()?;
        self.arena.get(id).map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            arena: self.arena,
        }
    }
}

/// Iterator over the keys of a [`Keys`] view.
pub struct KeysIter<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for KeysIter<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for KeysIter<'_, K, V> {}

/// Iterator over the values of a [`Values`] view.
pub struct ValuesIter<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesIter<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesIter<'_, K, V> {}

/// Set of keys currently mapped.
pub struct Keys<'a, K, V, S> {
    map: &'a ChainedHashMap<K, V, S>,
}

/// Collection of values currently mapped; duplicates appear once per entry.
pub struct Values<'a, K, V, S> {
    map: &'a ChainedHashMap<K, V, S>,
}

/// Set of `(key, value)` pairs currently mapped.
pub struct EntrySet<'a, K, V, S> {
    map: &'a ChainedHashMap<K, V, S>,
}

impl<'a, K, V, S> Keys<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn new(map: &'a ChainedHashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.views().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> KeysIter<'a, K, V> {
        KeysIter {
            inner: self.map.iter(),
        }
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(q)
    }
}

impl<'a, K, V, S> Values<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn new(map: &'a ChainedHashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.views().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> ValuesIter<'a, K, V> {
        ValuesIter {
            inner: self.map.iter(),
        }
    }

    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }
}

impl<'a, K, V, S> EntrySet<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn new(map: &'a ChainedHashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.views().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Iter<'a, K, V> {
        self.map.iter()
    }

    /// True when `key` is mapped to a value equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        self.map.get(key).is_some_and(|v| v == value)
    }
}

impl<'a, K, V, S> IntoIterator for &Keys<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = &'a K;
    type IntoIter = KeysIter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &Values<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = &'a V;
    type IntoIter = ValuesIter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &EntrySet<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> fmt::Debug for Keys<'_, K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, V, S> fmt::Debug for Values<'_, K, V, S>
where
    K: Eq + Hash,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, V, S> fmt::Debug for EntrySet<'_, K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
