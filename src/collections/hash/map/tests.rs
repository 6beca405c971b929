#![cfg(test)]

use std::collections::HashMap as StdHashMap;

use proptest::prelude::*;

use super::*;
use crate::Arena;
use crate::hash::hash_u64;

#[test]
fn test_insert_get_overwrite() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    assert_eq!(map.cap(), 0, "A new HashMap shouldn't allocate.");
    assert_eq!(map.get(5), None);

    assert_eq!(map.insert(5, 'a').unwrap(), None);
    assert_eq!(map.cap(), DEFAULT_CAP);
    assert_eq!(map.insert(5, 'b').unwrap(), Some('a'));
    assert_eq!(map.len(), 1, "Overwriting shouldn't change the length.");
    assert_eq!(map.get(5), Some(&'b'));
    assert!(map.contains(5));
    assert!(!map.contains(6));
}

#[test]
fn test_remove_then_get() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    for key in 0..10_u64 {
        map.insert(hash_u64(key), key * 100).unwrap();
    }
    for key in [2, 5, 7] {
        assert_eq!(map.remove(hash_u64(key)), Some(key * 100));
    }
    assert_eq!(map.remove(hash_u64(5)), None, "Removing twice should find nothing.");

    assert_eq!(map.len(), 7);
    for key in 0..10_u64 {
        let expected = (![2, 5, 7].contains(&key)).then_some(key * 100);
        assert_eq!(map.get(hash_u64(key)).copied(), expected, "Wrong value for key {}.", key);
    }
}

#[test]
fn test_hash_collisions() {
    let arena = Arena::new();
    let mut map = HashMap::with_cap(&arena, 8).unwrap();
    map.insert(0, "zero").unwrap();
    map.insert(8, "eight").unwrap();
    map.insert(16, "sixteen").unwrap();

    assert_eq!(map.remove(8), Some("eight"));
    assert_eq!(map.deleted(), 1);
    assert_eq!(
        map.get(16),
        Some(&"sixteen"),
        "Lookups should probe past tombstones."
    );

    map.insert(24, "twenty four").unwrap();
    assert_eq!(map.deleted(), 0, "Insertion should reuse the first tombstone it passes.");
    assert_eq!(map.len(), 3);
    for (hash, value) in [(0, "zero"), (16, "sixteen"), (24, "twenty four")] {
        assert_eq!(map.get(hash), Some(&value));
    }
    assert_eq!(map.get(8), None);
}

#[test]
fn test_growth() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    for hash in 0..7 {
        map.insert(hash, hash * 10).unwrap();
    }
    assert_eq!(map.cap(), 8, "The table should keep one empty bucket.");

    map.insert(7, 70).unwrap();
    assert_eq!(map.cap(), 16);
    assert_eq!(map.len(), 8);
    for hash in 0..8 {
        assert_eq!(map.get(hash), Some(&(hash * 10)));
    }
}

#[test]
fn test_tombstones_trigger_rehash() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    for hash in 0..7 {
        map.insert(hash, ()).unwrap();
    }
    for hash in 0..7 {
        map.remove(hash);
    }
    assert_eq!(map.len(), 0);
    assert_eq!(map.deleted(), 7);

    map.insert(100, ()).unwrap();
    assert_eq!(map.deleted(), 0, "Growing should discard every tombstone.");
    assert_eq!(map.cap(), 16);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_resize() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    for hash in 0..4 {
        map.insert(hash, hash).unwrap();
    }
    map.remove(0);

    map.resize(8).unwrap();
    assert_eq!(map.cap(), 8, "Resizing to the same capacity should only rehash.");
    assert_eq!(map.deleted(), 0);
    assert_eq!(map.len(), 3);

    map.resize(4).unwrap();
    assert_eq!(map.cap(), 8, "Resizing should never shrink.");

    map.resize(100).unwrap();
    assert_eq!(map.cap(), 100);
    for hash in 1..4 {
        assert_eq!(map.get(hash), Some(&hash));
    }
}

#[test]
fn test_reserve() {
    let arena = Arena::new();
    let mut map: HashMap<u8> = HashMap::new(&arena);
    map.reserve(20).unwrap();
    assert_eq!(map.cap(), 32);

    for hash in 0..20 {
        map.insert(hash, 0).unwrap();
    }
    assert_eq!(map.cap(), 32, "Reserved capacity should fit every insertion.");

    assert!(map.reserve(usize::MAX).unwrap_err().is_capacity_overflow());
}

#[test]
fn test_get_mut_and_get_or_insert() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    map.insert(1, 1).unwrap();
    *map.get_mut(1).unwrap() += 10;
    assert_eq!(map.get(1), Some(&11));
    assert_eq!(map.get_mut(2), None);

    *map.get_or_insert(2, 0).unwrap() += 1;
    *map.get_or_insert(2, 0).unwrap() += 1;
    assert_eq!(map.get(2), Some(&2));
}

#[test]
fn test_clear() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    map.insert(1, 'x').unwrap();
    map.insert(2, 'y').unwrap();
    map.remove(1);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.deleted(), 0);
    assert_eq!(map.cap(), 8, "Clearing should keep the buckets.");
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn test_iter() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    for i in 1..=10_u64 {
        map.insert(hash_u64(i), i).unwrap();
    }

    let iter = map.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(map.values().sum::<u64>(), 55);

    let mut keys: Vec<u64> = map.keys().collect();
    keys.sort();
    let mut expected: Vec<u64> = (1..=10).map(hash_u64).collect();
    expected.sort();
    assert_eq!(keys, expected);
}

#[test]
fn test_copy_and_update() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    map.insert(1, 'a').unwrap();
    map.insert(2, 'b').unwrap();

    let other_arena = Arena::new();
    let mut copy = map.copy_to(&other_arena).unwrap();
    assert_eq!(copy.cap(), map.cap());
    copy.insert(1, 'z').unwrap();
    assert_eq!(map.get(1), Some(&'a'), "A copy should be independent of its source.");

    let mut extra = HashMap::new(&arena);
    extra.insert(3, 'c').unwrap();
    extra.insert(2, 'B').unwrap();
    map.update(&extra).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(2), Some(&'B'));
    assert_eq!(map.get(3), Some(&'c'));
}

#[test]
fn test_debug() {
    let arena = Arena::new();
    let mut map = HashMap::new(&arena);
    map.insert(3, "three").unwrap();
    assert_eq!(format!("{:?}", map), "{3: \"three\"}");
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u64, u32),
    Remove(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..48, any::<u32>()).prop_map(|(key, value)| Op::Insert(key, value)),
        (0u64..48).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_matches_std_map(ops in prop::collection::vec(op(), 0..200)) {
        let arena = Arena::new();
        let mut map = HashMap::new(&arena);
        let mut model = StdHashMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value).unwrap(), model.insert(key, value));
                },
                Op::Remove(key) => {
                    prop_assert_eq!(map.remove(key), model.remove(&key));
                },
            }
            prop_assert_eq!(map.len(), model.len());
            prop_assert!(map.cap() == 0 || map.len() + map.deleted() < map.cap());
        }

        for key in 0..48 {
            prop_assert_eq!(map.get(key), model.get(&key));
        }
    }
}
