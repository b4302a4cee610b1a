//! Bidirectional fail-fast cursor.

use std::hash::Hash;

use static_assertions::assert_impl_all;

use super::TreeList;
use crate::error::{TreeListError, TreeListResult};
use crate::index::ValueIndex;
use crate::tracing_helpers::debug_log;
use crate::tree::NodeId;

/// A position between two elements of a [`TreeList`].
///
/// A cursor does not borrow its list. Every call takes the list as an
/// argument, which lets a cursor edit the list it is walking. In return the
/// cursor checks the list's [`generation`](TreeList::generation) on every
/// call and fails with [`TreeListError::ConcurrentStructuralChange`] once the
/// list was structurally modified by anything other than this cursor.
///
/// A cursor must only be used with the list that created it.
///
/// `next` and `previous` are O(1) amortized: the cursor remembers the node
/// after its position and steps along thread links.
///
/// # Examples
///
/// ```rust
/// use indexed_tree_list::IndexedTreeList;
///
/// let mut list: IndexedTreeList<i32> = (1..=5).collect();
/// let mut cursor = list.cursor();
/// while let Some(&value) = cursor.next(&list).unwrap() {
///     if value % 2 == 0 {
///         cursor.remove(&mut list).unwrap();
///     }
/// }
/// assert_eq!(list.to_vec(), vec![1, 3, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Node at `next_index`, or `None` to look it up by index.
    next: Option<NodeId>,
    next_index: usize,
    /// Node and index returned by the last `next` or `previous`.
    current: Option<(NodeId, usize)>,
    expected_generation: u64,
}

assert_impl_all!(Cursor: Send, Sync, Clone);

impl Cursor {
    pub(super) fn new<T, I>(list: &TreeList<T, I>, index: usize) -> Self {
        Self {
            next: list.tree.get(index),
            next_index: index,
            current: None,
            expected_generation: list.generation,
        }
    }

    /// Returns `true` if [`next`](Self::next) would return an element.
    pub fn has_next<T, I>(&self, list: &TreeList<T, I>) -> bool {
        self.next_index < list.len()
    }

    /// Returns `true` if [`previous`](Self::previous) would return an element.
    pub const fn has_previous(&self) -> bool {
        self.next_index > 0
    }

    /// Returns the index of the element [`next`](Self::next) would return.
    pub const fn next_index(&self) -> usize {
        self.next_index
    }

    /// Returns the index of the element [`previous`](Self::previous) would
    /// return, or `None` at the start.
    pub const fn previous_index(&self) -> Option<usize> {
        self.next_index.checked_sub(1)
    }

    /// Advances over the next element and returns it, or `Ok(None)` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`TreeListError::ConcurrentStructuralChange`] if the list was
    /// structurally modified behind this cursor.
    pub fn next<'a, T, I>(&mut self, list: &'a TreeList<T, I>) -> TreeListResult<Option<&'a T>> {
        self.check_generation(list)?;
        if !self.has_next(list) {
            return Ok(None);
        }
        let id = match self.next {
            Some(id) if list.tree.contains_node(id) => id,
            _ => list.node_at(self.next_index)?,
        };
        self.current = Some((id, self.next_index));
        self.next_index += 1;
        self.next = list.tree.next(id);
        Ok(Some(list.tree.value(id)))
    }

    /// Moves back over the previous element and returns it, or `Ok(None)` at
    /// the start.
    ///
    /// # Errors
    ///
    /// Returns [`TreeListError::ConcurrentStructuralChange`] if the list was
    /// structurally modified behind this cursor.
    pub fn previous<'a, T, I>(
        &mut self,
        list: &'a TreeList<T, I>,
    ) -> TreeListResult<Option<&'a T>> {
        self.check_generation(list)?;
        if !self.has_previous() {
            return Ok(None);
        }
        let index = self.next_index - 1;
        let id = match self.next.and_then(|next| list.tree.previous(next)) {
            Some(id) => id,
            None => list.node_at(index)?,
        };
        self.next = Some(id);
        self.next_index = index;
        self.current = Some((id, index));
        Ok(Some(list.tree.value(id)))
    }

    /// Removes the element last returned by `next` or `previous`.
    ///
    /// # Errors
    ///
    /// - [`TreeListError::ConcurrentStructuralChange`] if the list was
    ///   structurally modified behind this cursor
    /// - [`TreeListError::NoCurrentElement`] if nothing was returned since the
    ///   last `add` or `remove`
    pub fn remove<T, I>(&mut self, list: &mut TreeList<T, I>) -> TreeListResult<T>
    where
        T: Clone + Eq + Hash,
        I: ValueIndex<T>,
    {
        self.check_generation(list)?;
        let (id, index) = self.current.ok_or(TreeListError::NoCurrentElement)?;
        let value = list.remove_node(id, index);
        if index < self.next_index {
            self.next_index -= 1;
        }
        // The removal may have moved values between nodes.
        self.next = None;
        self.current = None;
        self.expected_generation = list.generation;
        Ok(value)
    }

    /// Replaces the element last returned by `next` or `previous` and
    /// returns the previous value.
    ///
    /// # Errors
    ///
    /// - [`TreeListError::ConcurrentStructuralChange`] if the list was
    ///   structurally modified behind this cursor
    /// - [`TreeListError::NoCurrentElement`] if nothing was returned since the
    ///   last `add` or `remove`
    /// - [`TreeListError::InvalidArgument`] if the list is unique and
    ///   `value` is stored at another index
    pub fn set<T, I>(&mut self, list: &mut TreeList<T, I>, value: T) -> TreeListResult<T>
    where
        T: Clone + Eq + Hash,
        I: ValueIndex<T>,
    {
        self.check_generation(list)?;
        let (id, _) = self.current.ok_or(TreeListError::NoCurrentElement)?;
        list.replace_node(id, value)
    }

    /// Inserts `value` at the cursor position, before the element `next`
    /// would return, and moves the cursor past it.
    ///
    /// Returns `Ok(false)` without moving if the list rejected `value` as a
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`TreeListError::ConcurrentStructuralChange`] if the list was
    /// structurally modified behind this cursor.
    pub fn add<T, I>(&mut self, list: &mut TreeList<T, I>, value: T) -> TreeListResult<bool>
    where
        T: Clone + Eq + Hash,
        I: ValueIndex<T>,
    {
        self.check_generation(list)?;
        if list.insert_node(self.next_index, value).is_none() {
            return Ok(false);
        }
        self.next_index += 1;
        self.current = None;
        self.expected_generation = list.generation;
        Ok(true)
    }

    fn check_generation<T, I>(&self, list: &TreeList<T, I>) -> TreeListResult<()> {
        if list.generation == self.expected_generation {
            return Ok(());
        }
        debug_log!(
            expected = self.expected_generation,
            actual = list.generation,
            "stale cursor"
        );
        Err(TreeListError::ConcurrentStructuralChange {
            expected: self.expected_generation,
            actual: list.generation,
        })
    }
}
