use proptest::{prop_assert, prop_assert_eq, proptest};

use crate::{Arena, Map, ID};

#[test]
fn insert_and_get() {
    let mut arena = Arena::<&str>::new();

    let first = arena.insert("first");
    let second = arena.insert("second");

    assert_ne!(first, second);
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(first).copied(), Some("first"));
    assert_eq!(arena.get(second).copied(), Some("second"));
    assert!(arena.get(ID::new(2)).is_none());

    *arena.get_mut(first).unwrap() = "rewritten";
    assert_eq!(arena.get(first).copied(), Some("rewritten"));
}

#[test]
fn interning_returns_same_id() {
    let mut map = Map::<(u32, u32)>::new();

    let a = map.intern((1, 2));
    let b = map.intern((2, 1));
    let c = map.intern((1, 2));

    assert_eq!(a, c);
    assert_ne!(a, b);
    assert_eq!(map.get(a), Some(&(1, 2)));
    assert_eq!(map.get(b), Some(&(2, 1)));
    assert!(map.get(ID::new(2)).is_none());
}

#[test]
fn insert_existing_key_hands_item_back() {
    let mut map = Map::<&str, String>::new();

    let id = map.insert("key".to_owned(), "value").unwrap();
    let (existing, item) = map.insert("key".to_owned(), "other").unwrap_err();

    assert_eq!(existing, id);
    assert_eq!(item, "other");
    assert_eq!(map.get(id).copied(), Some("value"));
}

proptest! {
    #[test]
    fn id_round_trips_its_index(id: ID<u8>) {
        prop_assert_eq!(ID::<u8>::new(id.index()), id);
    }

    #[test]
    fn every_id_refers_to_an_item(arena: Arena<u32>) {
        for index in 0..arena.len() {
            prop_assert!(arena.get(ID::new(index)).is_some());
        }

        prop_assert!(arena.get(ID::new(arena.len())).is_none());
    }
}
