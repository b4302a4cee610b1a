//! Property-based tests for tree list laws.
//!
//! Every list is compared against a `Vec` model receiving the same edits.

use indexed_tree_list::{IndexedTreeList, TreeListSet};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Insert(usize, u8),
    Remove(usize),
    Set(usize, u8),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (any::<usize>(), 0..12u8).prop_map(|(index, value)| Edit::Insert(index, value)),
        2 => any::<usize>().prop_map(Edit::Remove),
        1 => (any::<usize>(), 0..12u8).prop_map(|(index, value)| Edit::Set(index, value)),
    ]
}

fn positions_of(model: &[u8], value: u8) -> Vec<usize> {
    model
        .iter()
        .enumerate()
        .filter(|(_, element)| **element == value)
        .map(|(index, _)| index)
        .collect()
}

// =============================================================================
// Positional Laws
// =============================================================================

proptest! {
    /// Insert-Get Law: an inserted value is found at its insertion index.
    #[test]
    fn prop_insert_get_law(
        elements in prop::collection::vec(any::<i32>(), 0..60),
        index in any::<usize>(),
        value in any::<i32>()
    ) {
        let mut list: IndexedTreeList<i32> = elements.iter().copied().collect();
        let index = index % (elements.len() + 1);
        list.insert(index, value).unwrap();
        prop_assert_eq!(list.get(index), Ok(&value));
        prop_assert_eq!(list.len(), elements.len() + 1);
    }

    /// Insert-Remove Law: removing what was just inserted restores the list.
    #[test]
    fn prop_insert_remove_law(
        elements in prop::collection::vec(any::<i32>(), 0..60),
        index in any::<usize>(),
        value in any::<i32>()
    ) {
        let mut list: IndexedTreeList<i32> = elements.iter().copied().collect();
        let index = index % (elements.len() + 1);
        list.insert(index, value).unwrap();
        prop_assert_eq!(list.remove(index), Ok(value));
        prop_assert_eq!(list.to_vec(), elements);
    }

    /// Set-Get Law: a replaced value is read back, others are unchanged.
    #[test]
    fn prop_set_get_law(
        elements in prop::collection::vec(any::<i32>(), 1..60),
        index in any::<usize>(),
        value in any::<i32>()
    ) {
        let mut list: IndexedTreeList<i32> = elements.iter().copied().collect();
        let index = index % elements.len();
        prop_assert_eq!(list.set(index, value), Ok(elements[index]));
        let mut expected = elements.clone();
        expected[index] = value;
        prop_assert_eq!(list.to_vec(), expected);
    }

    /// Iteration agrees in both directions.
    #[test]
    fn prop_reverse_iteration(elements in prop::collection::vec(any::<i32>(), 0..100)) {
        let list: IndexedTreeList<i32> = elements.iter().copied().collect();
        let mut reversed: Vec<i32> = list.iter().rev().copied().collect();
        reversed.reverse();
        prop_assert_eq!(reversed, elements);
    }
}

// =============================================================================
// Lookup Laws
// =============================================================================

proptest! {
    /// indexes, index_of, last_index_of and count agree with a linear scan
    /// after any sequence of edits.
    #[test]
    fn prop_multi_lookup_matches_scan(edits in prop::collection::vec(edit(), 0..200)) {
        let mut list: IndexedTreeList<u8> = IndexedTreeList::new();
        let mut model: Vec<u8> = Vec::new();
        for edit in edits {
            match edit {
                Edit::Insert(index, value) => {
                    let index = index % (model.len() + 1);
                    list.insert(index, value).unwrap();
                    model.insert(index, value);
                }
                Edit::Remove(index) if !model.is_empty() => {
                    let index = index % model.len();
                    prop_assert_eq!(list.remove(index), Ok(model.remove(index)));
                }
                Edit::Set(index, value) if !model.is_empty() => {
                    let index = index % model.len();
                    list.set(index, value).unwrap();
                    model[index] = value;
                }
                _ => {}
            }
        }
        prop_assert_eq!(list.to_vec(), model.clone());
        for value in 0..12u8 {
            let expected = positions_of(&model, value);
            prop_assert_eq!(list.index_of(&value), expected.first().copied());
            prop_assert_eq!(list.last_index_of(&value), expected.last().copied());
            prop_assert_eq!(list.count(&value), expected.len());
            prop_assert_eq!(list.contains(&value), !expected.is_empty());
            prop_assert_eq!(list.indexes(&value), expected);
        }
    }

    /// A set never holds two equal values and behaves like a deduplicated
    /// list of the accepted insertions.
    #[test]
    fn prop_set_never_holds_duplicates(edits in prop::collection::vec(edit(), 0..200)) {
        let mut set: TreeListSet<u8> = TreeListSet::new();
        let mut model: Vec<u8> = Vec::new();
        for edit in edits {
            match edit {
                Edit::Insert(index, value) => {
                    let index = index % (model.len() + 1);
                    let accepted = set.insert(index, value).unwrap();
                    prop_assert_eq!(accepted, !model.contains(&value));
                    if accepted {
                        model.insert(index, value);
                    }
                }
                Edit::Remove(index) if !model.is_empty() => {
                    let index = index % model.len();
                    prop_assert_eq!(set.remove(index), Ok(model.remove(index)));
                }
                Edit::Set(index, value) if !model.is_empty() => {
                    let index = index % model.len();
                    let held_elsewhere = positions_of(&model, value).iter().any(|&other| other != index);
                    prop_assert_eq!(set.set(index, value).is_ok(), !held_elsewhere);
                    if !held_elsewhere {
                        model[index] = value;
                    }
                }
                _ => {}
            }
        }
        prop_assert_eq!(set.to_vec(), model.clone());
        for value in 0..12u8 {
            prop_assert_eq!(set.index_of(&value), model.iter().position(|element| *element == value));
        }
    }

    /// A cursor walk that removes matching elements equals `Vec::retain`.
    #[test]
    fn prop_cursor_removal_equals_retain(
        elements in prop::collection::vec(0..6u8, 0..80),
        removed in 0..6u8
    ) {
        let mut list: IndexedTreeList<u8> = elements.iter().copied().collect();
        let mut cursor = list.cursor();
        while let Some(&value) = cursor.next(&list).unwrap() {
            if value == removed {
                cursor.remove(&mut list).unwrap();
            }
        }
        let mut expected = elements.clone();
        expected.retain(|element| *element != removed);
        prop_assert_eq!(list.to_vec(), expected);
        prop_assert!(!list.contains(&removed));
    }
}
