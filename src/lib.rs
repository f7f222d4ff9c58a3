//! chained-hashmap: a separate-chaining hash table with arena-allocated
//! entries, capacity doubling, and incrementally maintained views.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash map whose structural invariants (slot indexing, chain
//!   integrity, size/threshold/capacity, aggregate views) can each be
//!   checked in one small module.
//! - Layers (leaf to root):
//!   - `entry`: key, value, stored hash and the `next` link, addressed by a
//!     generational `EntryId` in a `SlotMap` arena.
//!   - `chain`: append-at-tail, scan (with predecessor) and splice-out over
//!     the links of one slot.
//!   - `table`: the slot array of chain heads; `slot = hash mod capacity`.
//!   - `growth`: threshold arithmetic and the all-or-nothing rehash.
//!   - `views`: dense id list backing `key_set`, `values` and `entry_set`.
//!   - `ChainedHashMap<K, V, S>`: the public map and the only mutation path.
//!   - `SharedHashMap<K, V, S>`: the same map behind one `RwLock`.
//!
//! Constraints
//! - Unique keys: `put` on a present key replaces the value in place.
//! - Keys compare by value via `K: Eq`; borrowed lookups via `Borrow<Q>`.
//! - Each entry stores its `u64` hash; `K: Hash` runs once per insertion and
//!   never during a resize.
//! - Capacity is any positive integer. It doubles, as many times as one
//!   insertion needs, until size is back within
//!   `floor(capacity * load_factor)`; it saturates at the configured limit
//!   (at most `MAX_CAPACITY`) and never shrinks.
//! - Views always hold exactly the live entries: `key_set().len() ==
//!   values().len() == entry_set().len() == len()`.
//!
//! Concurrency
//! - `ChainedHashMap` mutates through `&mut self`, so a resize can never
//!   overlap another operation.
//! - `SharedHashMap` puts a single `parking_lot::RwLock` around every
//!   operation for cross-thread use.
//! - A debug-only reentrancy guard catches user `Eq` code that calls back
//!   into a map mid-mutation.
//!
//! Notes and non-goals
//! - No iteration-order guarantee across slots; within a slot, chain order
//!   is insertion order.
//! - No persistence, no tree-ified buckets.
//!
//! ```
//! use chained_hashmap::ChainedHashMap;
//!
//! let mut m = ChainedHashMap::new();
//! m.put("code", Some("1"));
//! m.put("data", None);
//! assert_eq!(m.get("code"), Some(&Some("1")));
//! assert_eq!(m.get("data"), Some(&None)); // mapped to an absent value
//! assert_eq!(m.get("java"), None); // no mapping at all
//! assert_eq!(m.remove("code"), Some(Some("1")));
//! assert!(!m.key_set().contains("code"));
//! ```

mod chain;
mod chained_hash_map;
#[cfg(test)]
mod chained_hash_map_proptest;
mod config;
mod entry;
mod error;
mod growth;
mod reentrancy;
mod shared;
mod table;
mod views;

// Public surface
pub use chain::ChainIter;
pub use chained_hash_map::ChainedHashMap;
pub use config::{Config, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_CAPACITY, MIN_LOAD_FACTOR};
pub use error::MapError;
pub use shared::SharedHashMap;
pub use views::{EntrySet, Iter, Keys, KeysIter, Values, ValuesIter};
