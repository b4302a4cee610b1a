#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! Tree lists serialize as plain sequences in index order.

use indexed_tree_list::{IndexedTreeList, TreeListSet};
use rstest::rstest;

#[rstest]
fn test_list_serializes_as_sequence() {
    let list: IndexedTreeList<i32> = [3, 1, 3].into_iter().collect();
    assert_eq!(serde_json::to_string(&list).unwrap(), "[3,1,3]");
}

#[rstest]
fn test_list_json_roundtrip() {
    let list: IndexedTreeList<String> = ["b", "a", "b"].into_iter().map(String::from).collect();
    let json = serde_json::to_string(&list).unwrap();
    let restored: IndexedTreeList<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, list);
    assert_eq!(restored.indexes("b"), vec![0, 2]);
}

#[rstest]
fn test_set_deserialization_drops_duplicates() {
    let set: TreeListSet<i32> = serde_json::from_str("[5, 3, 5, 1]").unwrap();
    assert_eq!(set.to_vec(), vec![5, 3, 1]);
    assert_eq!(set.index_of(&1), Some(2));
}

#[rstest]
fn test_empty_list_roundtrip() {
    let list: IndexedTreeList<i32> = IndexedTreeList::new();
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, "[]");
    let restored: IndexedTreeList<i32> = serde_json::from_str(&json).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_deserialize_rejects_non_sequence() {
    let result: Result<IndexedTreeList<i32>, _> = serde_json::from_str("{\"a\": 1}");
    assert!(result.is_err());
}
