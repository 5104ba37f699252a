use super::{Map, Set};
use crate::error::Error;

#[test]
fn test_map_stays_sorted() {
    let mut map = Map::new();
    for key in [5, 1, 9, 3, 7] {
        assert_eq!(map.insert(key, key * 10), None);
    }

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 9]);
    assert_eq!(map.insert(3, 33), Some(30));
    assert_eq!(map.len(), 5);
    assert_eq!(map.get(&3), Some(&33));
}

#[test]
fn test_map_find_is_insertion_point() {
    let map: Map<i32, ()> = [(10, ()), (20, ()), (30, ())].into_iter().collect();
    assert_eq!(map.find(&5), 0);
    assert_eq!(map.find(&10), 0);
    assert_eq!(map.find(&15), 1);
    assert_eq!(map.find(&30), 2);
    assert_eq!(map.find(&31), 3);
}

#[test]
fn test_map_at_missing() {
    let mut map = Map::<&str, i32>::new();
    assert_eq!(map.at(&"absent"), Err(Error::MissingEntry));
    assert_eq!(map.at_mut(&"absent"), Err(Error::MissingEntry));

    *map.at_or_default("present") += 4;
    *map.at_or_default("present") += 4;
    assert_eq!(map.at(&"present"), Ok(&8));
    assert!(map.contains(&"present"));
}

#[test]
fn test_map_remove() {
    let mut map: Map<u8, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    assert_eq!(map.remove(&2), Some('b'));
    assert_eq!(map.remove(&2), None);
    assert_eq!(map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(), vec![(1, 'a'), (3, 'c')]);

    map.retain(|&k, _| k > 1);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec!['c']);
}

#[test]
fn test_map_from_iter_last_duplicate_wins() {
    let map: Map<u8, &str> = [(1, "first"), (0, "zero"), (1, "second")].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&"second"));
}

#[test]
fn test_set_insert_remove() {
    let mut set = Set::new();
    assert!(set.insert(4));
    assert!(set.insert(2));
    assert!(!set.insert(4));
    assert!(set.insert(8));
    assert_eq!(set.as_slice(), &[2, 4, 8]);

    assert!(set.contains(&4));
    assert!(set.remove(&4));
    assert!(!set.remove(&4));
    assert!(!set.contains(&4));
    assert_eq!(set.len(), 2);
    assert_eq!(set.find(&3), 1);
}

#[test]
fn test_set_from_iter_dedups() {
    let set: Set<i32> = [3, 1, 3, 2, 1].into_iter().collect();
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(!set.is_empty());
}
