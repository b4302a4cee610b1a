//! Tests for the hasher selection.
//!
//! These run under every feature combination; with `fxhash` or `ahash`
//! enabled they exercise the fast default hasher.

use std::collections::hash_map::RandomState;

use indexed_tree_list::{DefaultHashBuilder, IndexedTreeList, TreeListSet};
use rstest::rstest;

#[rstest]
fn test_default_hasher_finds_every_value() {
    let list: IndexedTreeList<String, DefaultHashBuilder> =
        (0..500).map(|value| format!("key-{}", value % 50)).collect();
    for value in 0..50 {
        let key = format!("key-{value}");
        assert_eq!(list.count(key.as_str()), 10);
        assert_eq!(list.index_of(key.as_str()), Some(value));
    }
}

#[rstest]
fn test_explicit_std_hasher() {
    let mut set = TreeListSet::<u64, RandomState>::with_hasher(RandomState::new());
    for value in 0..100 {
        assert!(set.push(value * 7));
    }
    assert!(!set.push(14));
    assert_eq!(set.index_of(&14), Some(2));
}

#[cfg(feature = "fxhash")]
#[rstest]
fn test_fxhash_is_default() {
    let list: IndexedTreeList<i32, rustc_hash::FxBuildHasher> = IndexedTreeList::new();
    let default: IndexedTreeList<i32> = list.clone();
    assert!(default.is_empty());
}

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
#[rstest]
fn test_ahash_is_default() {
    let list: IndexedTreeList<i32, ahash::RandomState> = IndexedTreeList::new();
    let default: IndexedTreeList<i32> = list.clone();
    assert!(default.is_empty());
}
