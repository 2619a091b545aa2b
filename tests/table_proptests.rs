// Model-checked property tests for both table strategies.
//
// Property 1: every operation sequence agrees with std HashMap.
//  - Model: HashMap<u16, u32>.
//  - Operations: put, insert, get, delete, contains.
//  - Invariant after each step: size() == model.len(); keys() and traverse() enumerate
//    exactly the model's live set.
//
// Property 2: the linear probing load factor stays inside the resize thresholds.
//  - After a put: (size - 1) * 2 <= capacity, whatever the starting capacity. The growth
//    check runs before the entry lands, so the load factor can pass 0.5 by one entry.
//  - A delete that leaves the load factor <= 0.125 halves the capacity; any other delete
//    keeps it.
//
// Property 3: an explicit resize preserves every association and drops all tombstones.
//  - Any positive target is accepted; the capacity settles at the target doubled as often as
//    re-putting the entries requires.
//
// Property 4: insert never overwrites; put always does.
use std::{cmp::Ordering, collections::HashMap};

use hashtab::{HashTable, LinProbTable, ResizePolicy, SepChainTable, compare, hash};
use proptest::prelude::*;

type KeyHasher = fn(&u16, usize) -> usize;
type KeyComparator = fn(&u16, &u16) -> Ordering;

#[derive(Debug, Clone)]
enum Op {
    Put(u16, u32),
    Insert(u16, u32),
    Get(u16),
    Delete(u16),
    Contains(u16),
}

// Small key space so that hits, misses and tombstone reuse all happen
fn op_strategy() -> impl Strategy<Value = Op> {
    let key = 0u16..64;
    prop_oneof![
        3 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        1 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => key.clone().prop_map(Op::Get),
        2 => key.clone().prop_map(Op::Delete),
        1 => key.prop_map(Op::Contains),
    ]
}

fn hasher_strategy() -> impl Strategy<Value = KeyHasher> {
    let div: KeyHasher = hash::int_div::<u16>;
    let knuth: KeyHasher = hash::int_mult_knuth::<u16>;
    // every key collides
    let constant: KeyHasher = |_, _| 0;
    prop_oneof![Just(div), Just(knuth), Just(constant)]
}

fn comparator() -> KeyComparator {
    compare::natural::<u16>
}

fn sorted_keys<T: HashTable<u16, u32>>(table: &T) -> Vec<u16> {
    let mut keys: Vec<u16> = table.keys().into_iter().copied().collect();
    keys.sort_unstable();
    keys
}

fn check_against_model<T: HashTable<u16, u32>>(
    table: &mut T,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<u16, u32> = HashMap::new();

    for op in ops {
        match op {
            Op::Put(k, v) => {
                prop_assert_eq!(table.put(k, v), model.insert(k, v));
            }
            Op::Insert(k, v) => {
                let absent = !model.contains_key(&k);
                if absent {
                    model.insert(k, v);
                }
                prop_assert_eq!(table.insert(k, v), absent);
            }
            Op::Get(k) => {
                prop_assert_eq!(table.get(&k), model.get(&k));
            }
            Op::Delete(k) => {
                let before = table.size();
                let expected = model.remove(&k).map(|v| (k, v));
                let removed = table.delete(&k);
                prop_assert_eq!(removed.is_some(), expected.is_some());
                prop_assert_eq!(removed, expected);
                prop_assert_eq!(table.size() + usize::from(expected.is_some()), before);
                prop_assert!(!table.contains(&k));
            }
            Op::Contains(k) => {
                prop_assert_eq!(table.contains(&k), model.contains_key(&k));
            }
        }

        prop_assert_eq!(table.size(), model.len());
        let mut expected_keys: Vec<u16> = model.keys().copied().collect();
        expected_keys.sort_unstable();
        prop_assert_eq!(sorted_keys(table), expected_keys);

        let mut visited = Vec::new();
        table.traverse(|k, v| visited.push((*k, *v)));
        visited.sort_unstable();
        let mut expected_entries: Vec<(u16, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        expected_entries.sort_unstable();
        prop_assert_eq!(visited, expected_entries);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_sepchain_matches_model(
        capacity in 1usize..32,
        hasher in hasher_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..200),
    ) {
        let mut table = SepChainTable::new(capacity, hasher, comparator());
        check_against_model(&mut table, ops)?;
        prop_assert_eq!(table.capacity(), capacity);
    }

    #[test]
    fn prop_linprob_matches_model(
        capacity in 0usize..32,
        hasher in hasher_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..200),
    ) {
        let mut table = LinProbTable::new(capacity, hasher, comparator());
        check_against_model(&mut table, ops)?;
    }

    #[test]
    fn prop_linprob_fixed_policy_matches_model(
        capacity in 1usize..16,
        hasher in hasher_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..200),
    ) {
        let mut table = LinProbTable::new(capacity, hasher, comparator())
            .with_policy(ResizePolicy::fixed());
        check_against_model(&mut table, ops)?;
    }

    #[test]
    fn prop_absent_handle_wraps_live_table(
        ops in proptest::collection::vec(op_strategy(), 1..100),
    ) {
        let mut table = Some(LinProbTable::new(4, hasher_for_handle(), comparator()));
        check_against_model(&mut table, ops)?;
    }

    #[test]
    fn prop_linprob_load_factor_bounds(
        capacity in 0usize..40,
        ops in proptest::collection::vec(op_strategy(), 1..300),
    ) {
        let mut table = LinProbTable::new(capacity, hash::int_div::<u16>, comparator());
        for op in ops {
            match op {
                Op::Put(k, v) | Op::Insert(k, v) => {
                    table.put(k, v);
                    prop_assert!((table.size() - 1) * 2 <= table.capacity());
                }
                Op::Delete(k) => {
                    let before = table.capacity();
                    if table.delete(&k).is_some() {
                        let shrunk = before > 1 && table.size() * 8 <= before;
                        if shrunk {
                            prop_assert_eq!(table.capacity(), before / 2);
                        } else {
                            prop_assert_eq!(table.capacity(), before);
                        }
                    }
                }
                Op::Get(_) | Op::Contains(_) => {}
            }
            prop_assert!(table.size() + table.tombstones() <= table.capacity());
        }
    }

    #[test]
    fn prop_resize_preserves_entries(
        entries in proptest::collection::hash_map(any::<u16>(), any::<u32>(), 0..100),
        deleted in proptest::collection::vec(any::<u16>(), 0..50),
        target in 1usize..160,
        hasher in hasher_strategy(),
    ) {
        let mut table = LinProbTable::new(8, hasher, comparator());
        let mut model = entries.clone();
        for (&k, &v) in &entries {
            table.put(k, v);
        }
        for k in &deleted {
            table.delete(k);
            model.remove(k);
        }

        table.resize(target);
        let capacity = table.capacity();
        prop_assert!(capacity >= target);
        prop_assert!(capacity >= table.size());
        prop_assert_eq!(capacity % target, 0);
        prop_assert!((capacity / target).is_power_of_two());
        if table.size() * 2 < target {
            prop_assert_eq!(capacity, target);
        }
        prop_assert_eq!(table.tombstones(), 0);
        prop_assert_eq!(table.size(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(table.get(k), Some(v));
        }
    }

    #[test]
    fn prop_insert_never_overwrites(
        key in any::<u16>(),
        first in any::<u32>(),
        second in any::<u32>(),
    ) {
        let mut chained = SepChainTable::new(7, hash::int_div::<u16>, comparator());
        let mut probed = LinProbTable::new(0, hash::int_div::<u16>, comparator());

        chained.put(key, first);
        prop_assert!(!chained.insert(key, second));
        prop_assert_eq!(chained.get(&key), Some(&first));
        prop_assert_eq!(chained.put(key, second), Some(first));
        prop_assert_eq!(chained.get(&key), Some(&second));

        probed.put(key, first);
        prop_assert!(!probed.insert(key, second));
        prop_assert_eq!(probed.get(&key), Some(&first));
        prop_assert_eq!(probed.put(key, second), Some(first));
        prop_assert_eq!(probed.get(&key), Some(&second));
    }
}

fn hasher_for_handle() -> KeyHasher {
    hash::int_div::<u16>
}
