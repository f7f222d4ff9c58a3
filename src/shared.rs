//! SharedHashMap: one `RwLock` around a whole `ChainedHashMap`.
//!
//! Every operation takes the lock, so a resize triggered inside `put` runs
//! with writers and readers excluded and no reader ever sees a partially
//! migrated table. Reads that hand out data clone it or run a closure under
//! the read lock; no guard escapes a method.

use crate::chained_hash_map::ChainedHashMap;
use crate::config::Config;
use crate::error::MapError;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use parking_lot::RwLock;

pub struct SharedHashMap<K, V, S = DefaultHashBuilder> {
    inner: RwLock<ChainedHashMap<K, V, S>>,
}

impl<K, V> SharedHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::from_map(ChainedHashMap::new())
    }

    pub fn try_with_config(config: Config) -> Result<Self, MapError> {
        ChainedHashMap::try_with_config(config).map(Self::from_map)
    }
}

impl<K, V> Default for SharedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> SharedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn from_map(map: ChainedHashMap<K, V, S>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }

    pub fn into_inner(self) -> ChainedHashMap<K, V, S> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.read().get(q).cloned()
    }

    /// Run `f` on the value under the read lock.
    pub fn get_with<Q, R, F>(&self, q: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.read().get(q).map(f)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().contains_key(q)
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.read().contains_value(value)
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.write().put(key, value)
    }

    /// All pairs go in under a single write lock.
    pub fn put_all<I>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.write().put_all(pairs)
    }

    pub fn remove<Q>(&self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.write().remove(q)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Snapshot of the keys.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.read().key_set().iter().cloned().collect()
    }

    /// Snapshot of the values.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.inner.read().values().iter().cloned().collect()
    }

    /// Snapshot of the entries.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Run `f` with shared access to the whole map.
    pub fn read<R>(&self, f: impl FnOnce(&ChainedHashMap<K, V, S>) -> R) -> R {
        f(&self.inner.read())
    }
}
