//! Integration tests for `TreeListSet`.

use indexed_tree_list::{TreeListError, TreeListSet};
use rstest::rstest;

fn set_of(values: &[i32]) -> TreeListSet<i32> {
    values.iter().copied().collect()
}

#[rstest]
fn test_head_insertion_then_removal() {
    let mut set: TreeListSet<i32> = TreeListSet::new();
    for value in [5, 3, 8, 1] {
        assert_eq!(set.insert(0, value), Ok(true));
    }
    assert_eq!(set.to_vec(), vec![1, 8, 3, 5]);

    assert_eq!(set.remove(2), Ok(3));
    assert_eq!(set.to_vec(), vec![1, 8, 5]);
    assert!(!set.contains(&3));
}

#[rstest]
fn test_duplicate_add_is_a_no_op() {
    let mut set = set_of(&[1, 8, 5]);
    assert!(!set.push(8));
    assert_eq!(set.insert(0, 5), Ok(false));
    assert_eq!(set.len(), 3);
    assert_eq!(set.to_vec(), vec![1, 8, 5]);
}

#[rstest]
fn test_duplicate_add_still_checks_index() {
    let mut set = set_of(&[1]);
    assert_eq!(
        set.insert(5, 1),
        Err(TreeListError::IndexOutOfRange { index: 5, len: 1 })
    );
}

#[rstest]
fn test_from_iter_drops_duplicates() {
    let set = set_of(&[3, 1, 3, 2, 1]);
    assert_eq!(set.to_vec(), vec![3, 1, 2]);
}

#[rstest]
fn test_set_replaces_and_reindexes() {
    let mut set = set_of(&[1, 8, 5]);
    assert_eq!(set.set(1, 9), Ok(8));
    assert_eq!(set.to_vec(), vec![1, 9, 5]);
    assert_eq!(set.index_of(&9), Some(1));
    assert_eq!(set.index_of(&8), None);
    assert!(set.push(8));
}

#[rstest]
fn test_set_to_own_value_succeeds() {
    let mut set = set_of(&[1, 2]);
    assert_eq!(set.set(1, 2), Ok(2));
    assert_eq!(set.index_of(&2), Some(1));
}

#[rstest]
fn test_set_to_value_held_elsewhere_is_rejected() {
    let mut set = set_of(&[1, 2, 3]);
    let result = set.set(0, 3);
    assert!(matches!(result, Err(TreeListError::InvalidArgument { .. })));
    assert_eq!(set.to_vec(), vec![1, 2, 3]);
    assert_eq!(set.index_of(&3), Some(2));
    assert_eq!(set.index_of(&1), Some(0));
}

#[rstest]
fn test_index_of_agrees_with_last_index_of() {
    let set = set_of(&[10, 20, 30]);
    for (position, value) in set.iter().enumerate() {
        assert_eq!(set.index_of(value), Some(position));
        assert_eq!(set.last_index_of(value), Some(position));
    }
}

#[rstest]
fn test_remove_value() {
    let mut set = set_of(&[1, 2, 3]);
    assert!(set.remove_value(&2));
    assert!(!set.remove_value(&2));
    assert_eq!(set.to_vec(), vec![1, 3]);
    assert_eq!(set.index_of(&3), Some(1));
}

#[rstest]
fn test_string_set_lookups_by_str() {
    let mut set: TreeListSet<String> = TreeListSet::new();
    set.push("alpha".to_string());
    set.push("beta".to_string());
    assert!(set.contains("beta"));
    assert_eq!(set.index_of("alpha"), Some(0));
    assert!(set.remove_value("alpha"));
    assert_eq!(set.index_of("beta"), Some(0));
}

#[rstest]
fn test_clear() {
    let mut set = set_of(&[1, 2]);
    set.clear();
    assert!(set.is_empty());
    assert!(set.push(1));
}
