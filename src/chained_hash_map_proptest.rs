#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can check
// the chain layout against the internal slot mapping.

use crate::chained_hash_map::ChainedHashMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    PutAll(Vec<(usize, i32)>),
    Remove(usize),
    Get(usize),
    Contains(String),
    ContainsValue(i32),
    Mutate(usize, i32),
    Clear,
    Views,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), -8i32..8).prop_map(|(i, v)| OpI::Put(i, v)),
            1 => proptest::collection::vec((idx.clone(), -8i32..8), 0..6).prop_map(OpI::PutAll),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (-8i32..8).prop_map(OpI::ContainsValue),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Views),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Structural checks that only hold if chains and slots agree:
// - every entry reachable from slot `s` hashes to `s`;
// - the chains together hold exactly `len` entries;
// - size stays within the threshold unless growth hit its limit.
fn check_layout<S: BuildHasher>(
    sut: &ChainedHashMap<Key, i32, S>,
    last_capacity: &mut usize,
) -> Result<(), TestCaseError> {
    let cap = sut.capacity();
    prop_assert!(cap >= *last_capacity, "capacity never shrinks");
    *last_capacity = cap;
    prop_assert!(sut.len() <= sut.threshold() || cap == sut.max_capacity());

    let mut total = 0;
    for slot in 0..cap {
        for (k, _) in sut.chain(slot) {
            let h = sut.hasher().hash_one(k);
            prop_assert_eq!((h % cap as u64) as usize, slot);
            total += 1;
        }
    }
    prop_assert_eq!(total, sut.len());
    Ok(())
}

fn run_state_machine<S: BuildHasher>(
    mut sut: ChainedHashMap<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut last_capacity = sut.capacity();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(&pool, i);
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::PutAll(pairs) => {
                let pairs: Vec<(Key, i32)> =
                    pairs.into_iter().map(|(i, v)| (key_from(&pool, i), v)).collect();
                sut.put_all(pairs.clone());
                model.extend(pairs);
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                let before = sut.len();
                let removed = sut.remove(&k);
                prop_assert_eq!(removed, model.remove(&k));
                if removed.is_none() {
                    prop_assert_eq!(sut.len(), before, "absent remove leaves size alone");
                }
                prop_assert!(!sut.contains_key(&k));
                prop_assert!(sut.get(&k).is_none());
            }
            OpI::Get(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::ContainsValue(v) => {
                let has_model = model.values().any(|mv| *mv == v);
                prop_assert_eq!(sut.contains_value(&v), has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence must match the model"),
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
            OpI::Views => {
                let s_keys: BTreeSet<_> = sut.key_set().iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);

                let mut s_vals: Vec<i32> = sut.values().iter().copied().collect();
                let mut m_vals: Vec<i32> = model.values().copied().collect();
                s_vals.sort_unstable();
                m_vals.sort_unstable();
                prop_assert_eq!(s_vals, m_vals);

                for (k, v) in sut.entry_set().iter() {
                    prop_assert_eq!(model.get(k), Some(v));
                }
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.key_set().len(), sut.len());
        prop_assert_eq!(sut.values().len(), sut.len());
        prop_assert_eq!(sut.entry_set().len(), sut.len());
        prop_assert_eq!(sut.iter().count(), sut.len());
        check_layout(&sut, &mut last_capacity)?;
    }

    // Every surviving key still resolves to its last-put value.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the replaced value and never duplicates a key.
// - `remove` returns the model's value; absent removes change nothing.
// - views match the model's projections and track `len` after every op.
// - every chain holds only keys hashing to its slot; capacity only grows.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::with_capacity(1), pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). Every key shares slot 0, which
// stresses chain append, scan and splice at head, middle and tail.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = ChainedHashMap::with_capacity_and_hasher(4, ConstBuildHasher);
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: growth from a single slot keeps every inserted key retrievable.
proptest! {
    #[test]
    fn prop_growth_keeps_all_keys(keys in proptest::collection::btree_set(any::<u32>(), 0..300)) {
        let mut m = ChainedHashMap::with_capacity(1);
        for (i, k) in keys.iter().enumerate() {
            m.put(*k, i);
        }
        prop_assert_eq!(m.len(), keys.len());
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k), Some(&i));
        }
        prop_assert!(m.len() <= m.threshold());
    }
}

#[test]
fn key_hash_matches_str_hash() {
    // Borrowed lookups rely on `Key` and `str` hashing identically.
    let b = hashbrown::hash_map::DefaultHashBuilder::default();
    assert_eq!(b.hash_one(Key("abc".into())), b.hash_one("abc"));
    let mut h = b.build_hasher();
    "abc".hash(&mut h);
    assert_eq!(h.finish(), b.hash_one("abc"));
}
