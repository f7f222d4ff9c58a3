//! ChainedHashMap: the public map and the single funnel for every mutation.
//!
//! Layout
//! - `entries`: arena owning every live entry (key, value, stored hash, link).
//! - `table`: chain heads plus (threshold, load factor); replaced whole on resize.
//! - `views`: dense list of live entry ids backing `key_set`/`values`/`entry_set`.
//!
//! Only `put`, `remove`/`remove_entry` and `clear` touch more than one of
//! those at a time, and each keeps all three in step before returning.

use crate::chain::ChainIter;
use crate::config::Config;
use crate::entry::{Arena, Entry};
use crate::error::MapError;
use crate::growth::{self, Growth};
use crate::reentrancy::DebugReentrancy;
use crate::table::Table;
use crate::views::{EntrySet, Iter, Keys, ViewIndex, Values};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace, warn};
use slotmap::SlotMap;

pub struct ChainedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    table: Table,
    entries: Arena<K, V>,
    views: ViewIndex,
    reentrancy: DebugReentrancy,
    // Set once the first saturated growth attempt has been reported.
    saturation_logged: bool,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Empty map with [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) slots and
    /// the default load factor.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Empty map with `capacity` slots; zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    pub fn try_with_config(config: Config) -> Result<Self, MapError> {
        Self::try_with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(Config::default(), hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::from_parts(
            Config::default().with_initial_capacity(capacity).clamped(),
            hasher,
        )
    }

    /// Build from an explicit config, rejecting invalid parameters.
    pub fn try_with_config_and_hasher(config: Config, hasher: S) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self::from_parts(config, hasher))
    }

    fn from_parts(config: Config, hasher: S) -> Self {
        Self {
            hasher,
            table: Table::with_max_capacity(
                config.initial_capacity,
                config.load_factor,
                config.max_capacity,
            ),
            entries: SlotMap::with_key(),
            views: ViewIndex::new(),
            reentrancy: DebugReentrancy::new(),
            saturation_logged: false,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Entry count the table may hold before the next insertion doubles it.
    pub fn threshold(&self) -> usize {
        self.table.threshold()
    }

    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Capacity at which doubling stops.
    pub fn max_capacity(&self) -> usize {
        self.table.max_capacity()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.reentrancy.check("get");
        let hash = self.make_hash(q);
        let id = self.table.find(&self.entries, hash, q)?;
        self.entries.get(id).map(|e| (&e.key, &e.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.reentrancy.check("get_mut");
        let hash = self.make_hash(q);
        let id = self.table.find(&self.entries, hash, q)?;
        self.entries.get_mut(id).map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.reentrancy.check("contains_key");
        let hash = self.make_hash(q);
        self.table.contains(&self.entries, hash, q)
    }

    /// Linear in the number of slots plus entries; every chain is scanned.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.reentrancy.check("contains_value");
        self.table.contains_value(&self.entries, value)
    }

    /// Map `key` to `value`, returning the value it replaced.
    ///
    /// An existing key keeps its entry and only the value is swapped. A new
    /// key is appended to the tail of its chain; if that takes the size past
    /// the threshold, the table doubles (as often as needed) before `put`
    /// returns, unless it has reached its growth limit.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.reentrancy.enter("put");
        let hash = self.make_hash(&key);

        if let Some(id) = self.table.find(&self.entries, hash, &key) {
            if let Some(e) = self.entries.get_mut(id) {
                trace!("put: replaced value in slot {}", self.table.slot_for(hash));
                return Some(mem::replace(&mut e.value, value));
            }
        }

        let id = self.entries.insert(Entry::new(key, value, hash));
        self.table.link(&mut self.entries, hash, id);
        self.views.insert(id);
        trace!(
            "put: new entry in slot {} (len {})",
            self.table.slot_for(hash),
            self.entries.len()
        );

        Self::grow(&mut self.table, &mut self.entries, &mut self.saturation_logged);
        None
    }

    // Takes the fields rather than `&mut self`: `put` still holds the guard.
    fn grow(table: &mut Table, entries: &mut Arena<K, V>, saturation_logged: &mut bool) {
        while growth::needs_growth(table, entries.len()) {
            match growth::grow(table, entries) {
                Growth::Resized { from, to, moved } => debug!(
                    "resize: capacity {from} -> {to}, threshold {}, {moved} entries relinked",
                    table.threshold()
                ),
                Growth::Saturated => {
                    if !*saturation_logged {
                        *saturation_logged = true;
                        warn!(
                            "resize skipped: capacity saturated at {} with {} entries",
                            table.capacity(),
                            entries.len()
                        );
                    } else {
                        trace!("resize skipped: capacity saturated");
                    }
                    return;
                }
            }
        }
    }

    /// Put every pair in order; later pairs win on duplicate keys.
    pub fn put_all<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in pairs {
            self.put(k, v);
        }
    }

    /// Remove `q`'s mapping, returning its value. Absent keys return `None`
    /// and leave the map untouched.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("remove");
        let hash = self.make_hash(q);
        let id = self.table.unlink(&mut self.entries, hash, q)?;
        self.views.remove(id);
        let entry = self.entries.remove(id)?;
        trace!(
            "remove: unlinked from slot {} (len {})",
            self.table.slot_for(hash),
            self.entries.len()
        );
        Some(entry.into_pair())
    }

    /// Drop every entry. Capacity is kept; the table never shrinks.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter("clear");
        let dropped = self.entries.len();
        self.table.clear();
        self.views.clear();
        self.entries.clear();
        debug!("clear: dropped {dropped} entries");
    }

    pub fn key_set(&self) -> Keys<'_, K, V, S> {
        Keys::new(self)
    }

    pub fn values(&self) -> Values<'_, K, V, S> {
        Values::new(self)
    }

    pub fn entry_set(&self) -> EntrySet<'_, K, V, S> {
        EntrySet::new(self)
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.views.ids(), &self.entries)
    }

    /// Entries of one slot in chain order; empty for out-of-range slots.
    pub fn chain(&self, slot: usize) -> ChainIter<'_, K, V> {
        self.table.chain(&self.entries, slot)
    }

    pub(crate) fn views(&self) -> &ViewIndex {
        &self.views
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.put_all(iter);
        m
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S>
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

impl<K, V, S> PartialEq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
