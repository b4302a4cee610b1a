//! The indexed list facade.
//!
//! This module provides [`TreeList`], a list that is also an index of its
//! own values, and its two standard configurations:
//!
//! - [`IndexedTreeList`]: duplicates allowed, every occurrence tracked
//! - [`TreeListSet`]: values are unique, like an insertion-ordered set
//!
//! # Time Complexity
//!
//! | Operation                 | Complexity                     |
//! |---------------------------|--------------------------------|
//! | `get` / `set`             | O(log N)                       |
//! | `insert` / `push`         | O(log N)                       |
//! | `remove`                  | O(log N)                       |
//! | `remove_value`            | O(log N)                       |
//! | `contains`                | O(1) average                   |
//! | `index_of`                | O(log N)                       |
//! | `last_index_of`           | O(log N)                       |
//! | `indexes` (multi)         | O(K · log N)                   |
//! | `count` (multi)           | O(1) average                   |
//! | `iter` / `to_vec`         | O(N)                           |
//! | `len` / `is_empty`        | O(1)                           |
//!
//! For [`IndexedTreeList`], insertions and removals of a value with K
//! occurrences cost an extra O(log K · log N) to keep its bucket ordered.
//!
//! # Examples
//!
//! ```rust
//! use indexed_tree_list::IndexedTreeList;
//!
//! let mut list: IndexedTreeList<char> = "banana".chars().collect();
//! assert_eq!(list.index_of(&'n'), Some(2));
//! assert_eq!(list.last_index_of(&'a'), Some(5));
//! assert_eq!(list.indexes(&'a'), vec![1, 3, 5]);
//!
//! list.insert(0, 'x').unwrap();
//! assert_eq!(list.indexes(&'a'), vec![2, 4, 6]);
//! ```
//!
//! ```rust
//! use indexed_tree_list::TreeListSet;
//!
//! let mut set: TreeListSet<&str> = TreeListSet::new();
//! assert!(set.push("one"));
//! assert!(set.push("two"));
//! assert!(!set.push("one"));
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.index_of("two"), Some(1));
//! ```

mod cursor;
mod iter;

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;
use std::ops::Index;

pub use cursor::Cursor;
pub use iter::{IntoIter, Iter};

use crate::error::{TreeListError, TreeListResult};
use crate::index::{DefaultHashBuilder, MultiIndex, UniqueIndex, ValueIndex};
use crate::tracing_helpers::debug_log;
use crate::tree::{NodeId, Tree};

const DUPLICATE_VALUE: &str = "value already present at another index";

/// A list with O(log N) positional operations and a built-in value index.
///
/// `TreeList` keeps its elements in insertion order in a positioned AVL
/// [`Tree`] and mirrors them in a [`ValueIndex`] `I`, which decides whether
/// duplicates are allowed. Use the aliases [`IndexedTreeList`] and
/// [`TreeListSet`] rather than naming `I` directly.
///
/// Every mutation updates both views before returning. Calls that fail
/// leave the list untouched.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Clone`, `Eq` and `Hash`; the
///   index keeps its own copy of each distinct value.
/// * `I` - The value index policy.
///
/// # Examples
///
/// ```rust
/// use indexed_tree_list::IndexedTreeList;
///
/// let mut list: IndexedTreeList<i32> = IndexedTreeList::new();
/// for value in [5, 3, 8, 1] {
///     list.insert(0, value).unwrap();
/// }
/// assert_eq!(list.to_vec(), vec![1, 8, 3, 5]);
///
/// assert_eq!(list.remove(2), Ok(3));
/// assert!(!list.contains(&3));
/// assert_eq!(list.to_vec(), vec![1, 8, 5]);
/// ```
#[derive(Clone)]
pub struct TreeList<T, I = MultiIndex<T>> {
    tree: Tree<T>,
    index: I,
    generation: u64,
}

/// A [`TreeList`] that allows duplicates and tracks every occurrence.
pub type IndexedTreeList<T, S = DefaultHashBuilder> = TreeList<T, MultiIndex<T, S>>;

/// A [`TreeList`] that stores each value at most once.
///
/// Adding a value that is already present leaves the list unchanged, and
/// `set` refuses to introduce a second copy of a value.
pub type TreeListSet<T, S = DefaultHashBuilder> = TreeList<T, UniqueIndex<T, S>>;

impl<T, I: Default> TreeList<T, I> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_index(I::default())
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Tree::with_capacity(capacity),
            index: I::default(),
            generation: 0,
        }
    }
}

impl<T, I> TreeList<T, I> {
    /// Creates an empty list around an empty `index`.
    pub const fn with_index(index: I) -> Self {
        Self {
            tree: Tree::new(),
            index,
            generation: 0,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the structural generation.
    ///
    /// The counter increases with every insertion, removal and clear, and
    /// is what detached [`Cursor`]s compare against.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeListError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> TreeListResult<&T> {
        self.node_at(index).map(|id| self.tree.value(id))
    }

    /// Returns the first element.
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|id| self.tree.value(id))
    }

    /// Returns the last element.
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|id| self.tree.value(id))
    }

    /// Returns an iterator over the elements in index order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree)
    }

    /// Returns a cursor positioned before the first element.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self, 0)
    }

    /// Returns a cursor positioned before the element at `index`.
    ///
    /// `index == len` positions the cursor after the last element.
    ///
    /// # Errors
    ///
    /// Returns [`TreeListError::IndexOutOfRange`] if `index > len`.
    pub fn cursor_at(&self, index: usize) -> TreeListResult<Cursor> {
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        Ok(Cursor::new(self, index))
    }

    /// Returns the underlying positioned tree.
    pub const fn tree(&self) -> &Tree<T> {
        &self.tree
    }

    pub(crate) fn node_at(&self, index: usize) -> TreeListResult<NodeId> {
        self.tree.get(index).ok_or_else(|| self.out_of_range(index))
    }

    pub(crate) const fn out_of_range(&self, index: usize) -> TreeListError {
        TreeListError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T, I> TreeList<T, I>
where
    T: Clone + Eq + Hash,
    I: ValueIndex<T>,
{
    /// Replaces the element at `index` and returns the previous one.
    ///
    /// # Errors
    ///
    /// - [`TreeListError::IndexOutOfRange`] if `index >= len`
    /// - [`TreeListError::InvalidArgument`] if the index is unique and
    ///   `value` is already stored at another index
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexed_tree_list::{TreeListError, TreeListSet};
    ///
    /// let mut set: TreeListSet<i32> = [1, 8, 5].into_iter().collect();
    /// assert_eq!(set.set(1, 9), Ok(8));
    /// assert_eq!(set.to_vec(), vec![1, 9, 5]);
    /// assert!(matches!(set.set(0, 5), Err(TreeListError::InvalidArgument { .. })));
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> TreeListResult<T> {
        let id = self.node_at(index)?;
        self.replace_node(id, value)
    }

    /// Appends `value` and returns `true`, or returns `false` if the index
    /// rejected it as a duplicate.
    pub fn push(&mut self, value: T) -> bool {
        self.insert_node(self.len(), value).is_some()
    }

    /// Inserts `value` before the element at `index`.
    ///
    /// Returns `Ok(false)` without changing the list if the index rejected
    /// `value` as a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`TreeListError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> TreeListResult<bool> {
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.insert_node(index, value).is_some())
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeListError::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> TreeListResult<T> {
        let id = self.node_at(index)?;
        Ok(self.remove_node(id, index))
    }

    /// Removes the first occurrence of `value`. Returns `true` if an element
    /// was removed.
    pub fn remove_value<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(id) = self.index.first(value) else {
            return false;
        };
        let index = self.tree.position(id);
        self.remove_node(id, index);
        true
    }

    /// Returns `true` if the list contains `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(value)
    }

    /// Returns the index of the first occurrence of `value`.
    pub fn index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.first(value).map(|id| self.tree.position(id))
    }

    /// Returns the index of the last occurrence of `value`.
    pub fn last_index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.last(value).map(|id| self.tree.position(id))
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        debug_log!(len = self.len(), "clearing tree list");
        self.tree.clear();
        self.index.clear();
        self.bump_generation();
    }

    /// Returns the elements in index order.
    pub fn to_vec(&self) -> Vec<T> {
        self.tree.values()
    }

    /// Returns the value index.
    pub const fn value_index(&self) -> &I {
        &self.index
    }

    pub(crate) fn insert_node(&mut self, index: usize, value: T) -> Option<NodeId> {
        if !self.index.admits(&value, None) {
            return None;
        }
        let id = self.tree.insert(index, value);
        self.index.register(&self.tree, id);
        self.bump_generation();
        Some(id)
    }

    /// Removes node `id`, which sits at `index`.
    pub(crate) fn remove_node(&mut self, id: NodeId, index: usize) -> T {
        self.index.unregister(&self.tree, id);
        let removal = self.tree.remove(index);
        if let Some(relocation) = removal.relocated {
            self.index.relocate(&self.tree, relocation);
        }
        self.bump_generation();
        removal.value
    }

    pub(crate) fn replace_node(&mut self, id: NodeId, value: T) -> TreeListResult<T> {
        if !self.index.admits(&value, Some(id)) {
            return Err(TreeListError::InvalidArgument {
                reason: DUPLICATE_VALUE,
            });
        }
        self.index.unregister(&self.tree, id);
        let previous = self.tree.replace(id, value);
        self.index.register(&self.tree, id);
        Ok(previous)
    }
}

impl<T, S> TreeList<T, MultiIndex<T, S>> {
    /// Creates an empty list using `hasher` to hash values.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_index(MultiIndex::with_hasher(hasher))
    }
}

impl<T, S> TreeList<T, MultiIndex<T, S>>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns every index holding `value`, ascending.
    pub fn indexes<Q>(&self, value: &Q) -> Vec<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.positions(&self.tree, value)
    }

    /// Returns the number of occurrences of `value`.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.count(value)
    }
}

impl<T, S> TreeList<T, UniqueIndex<T, S>> {
    /// Creates an empty set using `hasher` to hash values.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_index(UniqueIndex::with_hasher(hasher))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, I: Default> Default for TreeList<T, I> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I> Index<usize> for TreeList<T, I> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T, I> FromIterator<T> for TreeList<T, I>
where
    T: Clone + Eq + Hash,
    I: ValueIndex<T> + Default,
{
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, I> Extend<T> for TreeList<T, I>
where
    T: Clone + Eq + Hash,
    I: ValueIndex<T>,
{
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T, I> IntoIterator for &'a TreeList<T, I> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, I> IntoIterator for TreeList<T, I> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree)
    }
}

impl<T: PartialEq, I, J> PartialEq<TreeList<T, J>> for TreeList<T, I> {
    fn eq(&self, other: &TreeList<T, J>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, I> Eq for TreeList<T, I> {}

impl<T: fmt::Debug, I> fmt::Debug for TreeList<T, I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, I> fmt::Display for TreeList<T, I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (position, value) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, I> serde::Serialize for TreeList<T, I> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct TreeListVisitor<T, I> {
    marker: std::marker::PhantomData<(T, I)>,
}

#[cfg(feature = "serde")]
impl<T, I> TreeListVisitor<T, I> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, I> serde::de::Visitor<'de> for TreeListVisitor<T, I>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
    I: ValueIndex<T> + Default,
{
    type Value = TreeList<T, I>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut list = TreeList::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            list.push(element);
        }
        Ok(list)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, I> serde::Deserialize<'de> for TreeList<T, I>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
    I: ValueIndex<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreeListVisitor::new())
    }
}

// =============================================================================
// Structural Validation
// =============================================================================

#[cfg(test)]
impl<T, I> TreeList<T, I>
where
    T: Clone + Eq + Hash + fmt::Debug,
    I: ValueIndex<T>,
{
    /// Checks the tree and that every element is reachable by value.
    pub(crate) fn check_invariants(&self) {
        self.tree.check_invariants();
        assert_eq!(self.index.len(), self.tree.len(), "index size differs");
        for (position, value) in self.iter().enumerate() {
            let first = self.index_of(value).expect("value missing from index");
            let last = self.last_index_of(value).expect("value missing from index");
            assert!(
                first <= position && position <= last,
                "{value:?} at {position} outside [{first}, {last}]"
            );
            assert_eq!(self.get(first), Ok(value));
            assert_eq!(self.get(last), Ok(value));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
