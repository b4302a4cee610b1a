//! Positioned AVL tree over a node arena.
//!
//! This module provides [`Tree`], the engine behind every
//! [`TreeList`](crate::TreeList). It is an AVL tree ordered by *position*
//! rather than by value.
//!
//! # Internal Structure
//!
//! - Nodes live in an arena and refer to each other through [`NodeId`]
//!   handles. The arena owns every node.
//! - A node does not store its index. It stores its offset relative to its
//!   parent, and the root stores its absolute index, so an insertion or
//!   removal only touches offsets along one root path.
//! - A missing child is replaced by a *thread*: a link to the in-order
//!   predecessor (left) or successor (right). Stepping to a neighbour is
//!   therefore O(1) amortized without a parent walk.
//! - Parent links exist only for real subtree edges and are used to compute
//!   the absolute index of a node in O(log N).
//!
//! The tree maintains these invariants after every public call:
//! 1. `height(right) - height(left)` is -1, 0 or 1 for every node
//! 2. The sum of relative positions along a root path is the node's index
//! 3. Subtree extrema and thread links always name the in-order neighbours
//!
//! | Operation  | Complexity        |
//! |------------|-------------------|
//! | `get`      | O(log N)          |
//! | `insert`   | O(log N)          |
//! | `remove`   | O(log N)          |
//! | `position` | O(log N)          |
//! | `next`     | O(1) amortized    |
//! | `previous` | O(1) amortized    |
//!
//! # Examples
//!
//! ```rust
//! use indexed_tree_list::tree::Tree;
//!
//! let mut tree = Tree::new();
//! let b = tree.insert(0, 'b');
//! tree.insert(0, 'a');
//! tree.insert(2, 'c');
//!
//! assert_eq!(tree.position(b), 1);
//! assert_eq!(tree.values(), vec!['a', 'b', 'c']);
//! ```

mod arena;
mod node;

use std::fmt;

pub use node::NodeId;

use crate::tracing_helpers::trace_log;
use arena::Arena;
use node::Node;

#[allow(clippy::cast_possible_wrap)]
#[inline]
const fn to_offset(index: usize) -> isize {
    // Arena slots are larger than one byte, so a tree never holds more than
    // isize::MAX nodes.
    index as isize
}

#[allow(clippy::cast_sign_loss)]
#[inline]
fn to_index(offset: isize) -> usize {
    debug_assert!(offset >= 0, "negative absolute position {offset}");
    offset as usize
}

/// Describes a value that moved between node slots during a removal.
///
/// Removing a node with two children moves the value of its in-order
/// neighbour into the removed node's slot and frees the neighbour's slot.
/// Anything keyed by [`NodeId`] must re-point `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    /// The slot that used to hold the value. It is freed.
    pub from: NodeId,
    /// The slot that holds the value now.
    pub to: NodeId,
}

/// The result of [`Tree::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<T> {
    /// The removed element.
    pub value: T,
    /// Set when a surviving value changed slots.
    pub relocated: Option<Relocation>,
}

/// Bookkeeping threaded through one removal.
#[derive(Default)]
struct Unlink {
    slot: Option<NodeId>,
    relocated: Option<Relocation>,
}

/// A self-balancing tree indexed by position.
///
/// `Tree` only knows about positions. Pair it with a
/// [`ValueIndex`](crate::index::ValueIndex) for lookups by value, or use
/// [`TreeList`](crate::TreeList), which keeps both in sync.
#[derive(Clone)]
pub struct Tree<T> {
    arena: Arena<T>,
    root: Option<NodeId>,
    len: usize,
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    #[inline]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no nodes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` refers to a live node of this tree.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.arena.is_live(id)
    }

    /// Returns the value stored in the node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a live node.
    #[inline]
    pub fn value(&self, id: NodeId) -> &T {
        &self.arena[id].value
    }

    /// Replaces the value stored in the node and returns the previous one.
    ///
    /// The node keeps its position.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a live node.
    #[inline]
    pub fn replace(&mut self, id: NodeId, value: T) -> T {
        std::mem::replace(&mut self.arena[id].value, value)
    }

    /// Finds the node at `index`, or `None` if `index >= len`.
    pub fn get(&self, index: usize) -> Option<NodeId> {
        if index >= self.len {
            return None;
        }
        let mut current = self.root?;
        let mut remaining = to_offset(index);
        loop {
            let node = &self.arena[current];
            let relative = remaining - node.relative_position;
            let child = match relative.cmp(&0) {
                std::cmp::Ordering::Equal => return Some(current),
                std::cmp::Ordering::Less => node.left_subtree(),
                std::cmp::Ordering::Greater => node.right_subtree(),
            };
            match child {
                Some(child) => current = child,
                None => unreachable!("index {index} missing from tree of length {}", self.len),
            }
            remaining = relative;
        }
    }

    /// Returns the absolute index of the node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a live node.
    pub fn position(&self, id: NodeId) -> usize {
        let mut position = 0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.arena[node_id];
            position += node.relative_position;
            current = node.parent;
        }
        to_index(position)
    }

    /// Returns the node at index 0.
    pub fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.min(root))
    }

    /// Returns the node at index `len - 1`.
    pub fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.max(root))
    }

    /// Returns the in-order successor of the node.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.arena[id];
        match node.right_subtree() {
            Some(right) => Some(self.min(right)),
            None => node.right,
        }
    }

    /// Returns the in-order predecessor of the node.
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.arena[id];
        match node.left_subtree() {
            Some(left) => Some(self.max(left)),
            None => node.left,
        }
    }

    /// Inserts `value` so that it ends up at `index` and returns its node.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> NodeId {
        assert!(
            index <= self.len,
            "insertion index {index} out of range for length {}",
            self.len
        );
        let created = match self.root {
            None => {
                let created = self
                    .arena
                    .allocate(Node::leaf(to_offset(index), value, None, None));
                self.root = Some(created);
                created
            }
            Some(root) => {
                let (top, created) = self.insert_below(root, to_offset(index), value);
                self.set_root(Some(top));
                created
            }
        };
        self.len += 1;
        created
    }

    /// Removes the node at `index` and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Removal<T> {
        assert!(
            index < self.len,
            "removal index {index} out of range for length {}",
            self.len
        );
        let Some(root) = self.root else {
            unreachable!("non-empty tree without a root")
        };
        let mut unlink = Unlink::default();
        let top = self.remove_below(root, to_offset(index), &mut unlink);
        self.set_root(top);
        self.len -= 1;

        let Some(slot) = unlink.slot else {
            unreachable!("removal at {index} unlinked no node")
        };
        let node = self.arena.release(slot);
        Removal {
            value: node.value,
            relocated: unlink.relocated,
        }
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns references to all values in index order.
    pub fn values_ref(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(id) = current {
            values.push(self.value(id));
            current = self.next(id);
        }
        values
    }

    /// Consumes the tree and returns its values in index order.
    pub fn into_values(mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(id) = current {
            order.push(id);
            current = self.next(id);
        }
        order
            .into_iter()
            .map(|id| self.arena.release(id).value)
            .collect()
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Inserts below `id`, with `index` relative to the parent of `id`.
    /// Returns the new top of the subtree and the created node.
    fn insert_below(&mut self, id: NodeId, index: isize, value: T) -> (NodeId, NodeId) {
        let relative = index - self.arena[id].relative_position;
        if relative <= 0 {
            self.insert_on_left(id, relative, value)
        } else {
            self.insert_on_right(id, relative, value)
        }
    }

    fn insert_on_left(&mut self, id: NodeId, relative: isize, value: T) -> (NodeId, NodeId) {
        let created = match self.arena[id].left_subtree() {
            None => {
                let previous = self.arena[id].left;
                let created = self.arena.allocate(Node::leaf(-1, value, previous, Some(id)));
                self.set_left(id, Some(created), None);
                created
            }
            Some(left) => {
                let (top, created) = self.insert_below(left, relative, value);
                self.set_left(id, Some(top), None);
                created
            }
        };
        if self.arena[id].relative_position >= 0 {
            self.arena[id].relative_position += 1;
        }
        let top = self.balance(id);
        self.recalc_height(id);
        (top, created)
    }

    fn insert_on_right(&mut self, id: NodeId, relative: isize, value: T) -> (NodeId, NodeId) {
        let created = match self.arena[id].right_subtree() {
            None => {
                let next = self.arena[id].right;
                let created = self.arena.allocate(Node::leaf(1, value, Some(id), next));
                self.set_right(id, Some(created), None);
                created
            }
            Some(right) => {
                let (top, created) = self.insert_below(right, relative, value);
                self.set_right(id, Some(top), None);
                created
            }
        };
        if self.arena[id].relative_position < 0 {
            self.arena[id].relative_position -= 1;
        }
        let top = self.balance(id);
        self.recalc_height(id);
        (top, created)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes below `id`, with `index` relative to the parent of `id`.
    /// Returns the new top of the subtree.
    fn remove_below(&mut self, id: NodeId, index: isize, unlink: &mut Unlink) -> Option<NodeId> {
        let relative = index - self.arena[id].relative_position;
        if relative == 0 {
            return self.remove_self(id, unlink);
        }
        if relative > 0 {
            let right = self.expect_right(id);
            let top = self.remove_below(right, relative, unlink);
            let next = self.arena[right].right;
            self.set_right(id, top, next);
            if self.arena[id].relative_position < 0 {
                self.arena[id].relative_position += 1;
            }
        } else {
            let left = self.expect_left(id);
            let top = self.remove_below(left, relative, unlink);
            let previous = self.arena[left].left;
            self.set_left(id, top, previous);
            if self.arena[id].relative_position > 0 {
                self.arena[id].relative_position -= 1;
            }
        }
        self.recalc_height(id);
        Some(self.balance(id))
    }

    fn remove_min(&mut self, id: NodeId, unlink: &mut Unlink) -> Option<NodeId> {
        let Some(left) = self.arena[id].left_subtree() else {
            return self.remove_self(id, unlink);
        };
        let top = self.remove_min(left, unlink);
        let previous = self.arena[left].left;
        self.set_left(id, top, previous);
        if self.arena[id].relative_position > 0 {
            self.arena[id].relative_position -= 1;
        }
        self.recalc_height(id);
        Some(self.balance(id))
    }

    fn remove_max(&mut self, id: NodeId, unlink: &mut Unlink) -> Option<NodeId> {
        let Some(right) = self.arena[id].right_subtree() else {
            return self.remove_self(id, unlink);
        };
        let top = self.remove_max(right, unlink);
        let next = self.arena[right].right;
        self.set_right(id, top, next);
        if self.arena[id].relative_position < 0 {
            self.arena[id].relative_position += 1;
        }
        self.recalc_height(id);
        Some(self.balance(id))
    }

    /// Takes `id` out of its subtree and returns the subtree's new top.
    ///
    /// The unlinked slot stays allocated until [`Tree::remove`] releases it,
    /// so callers may still read its thread links.
    fn remove_self(&mut self, id: NodeId, unlink: &mut Unlink) -> Option<NodeId> {
        let node = &self.arena[id];
        let relative_position = node.relative_position;
        match (node.left_subtree(), node.right_subtree()) {
            (None, None) => {
                unlink.slot = Some(id);
                None
            }
            (Some(left), None) => {
                let next = node.right;
                self.arena[left].relative_position +=
                    relative_position + isize::from(relative_position < 0);
                let max = self.max(left);
                self.set_right(max, None, next);
                unlink.slot = Some(id);
                Some(left)
            }
            (None, Some(right)) => {
                let previous = node.left;
                self.arena[right].relative_position +=
                    relative_position - isize::from(relative_position >= 0);
                let min = self.min(right);
                self.set_left(min, None, previous);
                unlink.slot = Some(id);
                Some(right)
            }
            (Some(left), Some(right)) => {
                // Replace from the taller side; the factor moves towards zero
                // so this node needs no rotation.
                let neighbour = if self.balance_factor(id) > 0 {
                    let min = self.min(right);
                    let top = self.remove_min(right, unlink);
                    let next = self.arena[right].right;
                    self.set_right(id, top, next);
                    if relative_position < 0 {
                        self.arena[id].relative_position += 1;
                    }
                    min
                } else {
                    let max = self.max(left);
                    let top = self.remove_max(left, unlink);
                    let previous = self.arena[left].left;
                    self.set_left(id, top, previous);
                    if relative_position > 0 {
                        self.arena[id].relative_position -= 1;
                    }
                    max
                };
                self.arena.swap_values(id, neighbour);
                trace_log!(from = ?neighbour, to = ?id, "relocated neighbour value");
                unlink.relocated = Some(Relocation {
                    from: neighbour,
                    to: id,
                });
                self.recalc_height(id);
                Some(id)
            }
        }
    }

    // =========================================================================
    // Balancing
    // =========================================================================

    fn balance(&mut self, id: NodeId) -> NodeId {
        match self.balance_factor(id) {
            -1..=1 => id,
            -2 => {
                let left = self.expect_left(id);
                if self.balance_factor(left) > 0 {
                    let top = self.rotate_left(left);
                    self.set_left(id, Some(top), None);
                }
                self.rotate_right(id)
            }
            2 => {
                let right = self.expect_right(id);
                if self.balance_factor(right) < 0 {
                    let top = self.rotate_right(right);
                    self.set_right(id, Some(top), None);
                }
                self.rotate_left(id)
            }
            factor => unreachable!("tree inconsistent: balance factor {factor} at {id:?}"),
        }
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let new_top = self.expect_right(id);
        let moved = self.arena[new_top].left_subtree();

        let top_offset = self.arena[new_top].relative_position;
        let new_top_position = self.arena[id].relative_position + top_offset;
        let moved_position = top_offset + self.offset_of(moved);

        self.set_right(id, moved, Some(new_top));
        self.set_left(new_top, Some(id), None);

        self.arena[new_top].relative_position = new_top_position;
        self.arena[id].relative_position = -top_offset;
        if let Some(moved) = moved {
            self.arena[moved].relative_position = moved_position;
        }
        trace_log!(node = ?id, top = ?new_top, "rotate left");
        new_top
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let new_top = self.expect_left(id);
        let moved = self.arena[new_top].right_subtree();

        let top_offset = self.arena[new_top].relative_position;
        let new_top_position = self.arena[id].relative_position + top_offset;
        let moved_position = top_offset + self.offset_of(moved);

        self.set_left(id, moved, Some(new_top));
        self.set_right(new_top, Some(id), None);

        self.arena[new_top].relative_position = new_top_position;
        self.arena[id].relative_position = -top_offset;
        if let Some(moved) = moved {
            self.arena[moved].relative_position = moved_position;
        }
        trace_log!(node = ?id, top = ?new_top, "rotate right");
        new_top
    }

    // =========================================================================
    // Link Maintenance
    // =========================================================================

    fn set_root(&mut self, top: Option<NodeId>) {
        if let Some(top) = top {
            self.arena[top].parent = None;
        }
        self.root = top;
    }

    /// Links `child` as the left subtree, or threads to `previous` if absent.
    fn set_left(&mut self, id: NodeId, child: Option<NodeId>, previous: Option<NodeId>) {
        let node = &mut self.arena[id];
        node.left_is_thread = child.is_none();
        node.left = child.or(previous);
        if let Some(child) = child {
            self.arena[child].parent = Some(id);
        }
        self.recalc_height(id);
    }

    /// Links `child` as the right subtree, or threads to `next` if absent.
    fn set_right(&mut self, id: NodeId, child: Option<NodeId>, next: Option<NodeId>) {
        let node = &mut self.arena[id];
        node.right_is_thread = child.is_none();
        node.right = child.or(next);
        if let Some(child) = child {
            self.arena[child].parent = Some(id);
        }
        self.recalc_height(id);
    }

    fn recalc_height(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let height = self
            .height_of(node.left_subtree())
            .max(self.height_of(node.right_subtree()))
            + 1;
        self.arena[id].height = height;
    }

    fn height_of(&self, id: Option<NodeId>) -> i32 {
        id.map_or(-1, |id| self.arena[id].height)
    }

    fn offset_of(&self, id: Option<NodeId>) -> isize {
        id.map_or(0, |id| self.arena[id].relative_position)
    }

    /// Returns `height(right) - height(left)`.
    fn balance_factor(&self, id: NodeId) -> i32 {
        let node = &self.arena[id];
        self.height_of(node.right_subtree()) - self.height_of(node.left_subtree())
    }

    fn min(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left_subtree() {
            id = left;
        }
        id
    }

    fn max(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.arena[id].right_subtree() {
            id = right;
        }
        id
    }

    fn expect_left(&self, id: NodeId) -> NodeId {
        match self.arena[id].left_subtree() {
            Some(left) => left,
            None => unreachable!("tree inconsistent: {id:?} has no left subtree"),
        }
    }

    fn expect_right(&self, id: NodeId) -> NodeId {
        match self.arena[id].right_subtree() {
            Some(right) => right,
            None => unreachable!("tree inconsistent: {id:?} has no right subtree"),
        }
    }
}

impl<T: Clone> Tree<T> {
    /// Returns a snapshot of all values in index order.
    pub fn values(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(id) = current {
            values.push(self.value(id).clone());
            current = self.next(id);
        }
        values
    }
}

impl<T> Default for Tree<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.values_ref()).finish()
    }
}

// =============================================================================
// Structural Validation
// =============================================================================

#[cfg(test)]
impl<T> Tree<T> {
    /// Walks the whole tree and panics on the first broken invariant.
    pub(crate) fn check_invariants(&self) {
        let mut in_order = Vec::with_capacity(self.len);
        if let Some(root) = self.root {
            assert_eq!(self.arena[root].parent, None, "root has a parent");
            self.check_subtree(root, None, 0, &mut in_order);
        }
        assert_eq!(in_order.len(), self.len, "node count differs from len");

        for (expected, &(position, id)) in in_order.iter().enumerate() {
            assert_eq!(position, to_offset(expected), "wrong position for {id:?}");
            assert_eq!(self.position(id), expected, "position walk disagrees");
            assert_eq!(self.get(expected), Some(id), "get disagrees");

            let previous = expected.checked_sub(1).map(|index| in_order[index].1);
            let next = in_order.get(expected + 1).map(|&(_, next)| next);
            assert_eq!(self.previous(id), previous, "previous of {id:?}");
            assert_eq!(self.next(id), next, "next of {id:?}");

            let node = &self.arena[id];
            if node.left_is_thread {
                assert_eq!(node.left, previous, "left thread of {id:?}");
            }
            if node.right_is_thread {
                assert_eq!(node.right, next, "right thread of {id:?}");
            }
        }
    }

    fn check_subtree(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        parent_position: isize,
        in_order: &mut Vec<(isize, NodeId)>,
    ) -> i32 {
        let node = &self.arena[id];
        assert_eq!(node.parent, parent, "parent link of {id:?}");
        let position = parent_position + node.relative_position;

        let left_height = node
            .left_subtree()
            .map_or(-1, |left| self.check_subtree(left, Some(id), position, in_order));
        in_order.push((position, id));
        let right_height = node
            .right_subtree()
            .map_or(-1, |right| self.check_subtree(right, Some(id), position, in_order));

        assert_eq!(node.height, left_height.max(right_height) + 1, "height of {id:?}");
        assert!(
            (right_height - left_height).abs() <= 1,
            "unbalanced at {id:?}: {left_height} vs {right_height}"
        );
        node.height
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn tree_from(values: &[i32]) -> Tree<i32> {
        let mut tree = Tree::new();
        for (index, &value) in values.iter().enumerate() {
            tree.insert(index, value);
        }
        tree
    }

    #[rstest]
    fn test_new_tree_is_empty() {
        let tree: Tree<i32> = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.get(0), None);
        tree.check_invariants();
    }

    #[rstest]
    fn test_head_insertion_reverses_order() {
        let mut tree = Tree::new();
        for value in [5, 3, 8, 1] {
            tree.insert(0, value);
            tree.check_invariants();
        }
        assert_eq!(tree.values(), vec![1, 8, 3, 5]);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(31)]
    #[case(63)]
    fn test_remove_each_shape(#[case] index: usize) {
        let mut tree = tree_from(&(0..64).collect::<Vec<_>>());
        let removal = tree.remove(index);
        tree.check_invariants();
        assert_eq!(removal.value, i32::try_from(index).unwrap());
        assert_eq!(tree.len(), 63);
        assert!(!tree.values().contains(&removal.value));
    }

    #[rstest]
    fn test_two_child_removal_reports_relocation() {
        let mut tree = tree_from(&[0, 1, 2]);
        let root = tree.get(1).unwrap();
        let removal = tree.remove(1);
        tree.check_invariants();

        let relocation = removal.relocated.expect("root had two children");
        assert_eq!(relocation.to, root);
        assert!(!tree.contains_node(relocation.from));
        assert_eq!(removal.value, 1);
        assert_eq!(*tree.value(relocation.to), 0);
        assert_eq!(tree.position(relocation.to), 0);
    }

    #[rstest]
    fn test_leaf_removal_has_no_relocation() {
        let mut tree = tree_from(&[0, 1, 2]);
        let removal = tree.remove(2);
        assert_eq!(removal.relocated, None);
        assert_eq!(tree.values(), vec![0, 1]);
    }

    #[rstest]
    fn test_node_identity_survives_rotations() {
        let mut tree = Tree::new();
        let ids: Vec<NodeId> = (0..100).map(|value| tree.insert(tree.len(), value)).collect();
        tree.check_invariants();
        for (index, id) in ids.iter().enumerate() {
            assert_eq!(tree.position(*id), index);
            assert_eq!(*tree.value(*id), i32::try_from(index).unwrap());
        }
    }

    #[rstest]
    fn test_height_is_logarithmic() {
        let tree = tree_from(&(0..1024).collect::<Vec<_>>());
        let root = tree.root.unwrap();
        // AVL height bound: 1.44 * log2(n + 2)
        assert!(tree.arena[root].height <= 14);
    }

    #[rstest]
    fn test_neighbour_stepping_matches_order() {
        let tree = tree_from(&[10, 20, 30, 40, 50]);
        let mut forward = Vec::new();
        let mut current = tree.first();
        while let Some(id) = current {
            forward.push(*tree.value(id));
            current = tree.next(id);
        }
        let mut backward = Vec::new();
        let mut current = tree.last();
        while let Some(id) = current {
            backward.push(*tree.value(id));
            current = tree.previous(id);
        }
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward, vec![10, 20, 30, 40, 50]);
    }

    #[rstest]
    fn test_replace_keeps_position() {
        let mut tree = tree_from(&[1, 2, 3]);
        let id = tree.get(1).unwrap();
        assert_eq!(tree.replace(id, 9), 2);
        assert_eq!(tree.values(), vec![1, 9, 3]);
    }

    #[rstest]
    fn test_clear_resets() {
        let mut tree = tree_from(&[1, 2, 3]);
        tree.clear();
        assert!(tree.is_empty());
        tree.check_invariants();
        tree.insert(0, 7);
        assert_eq!(tree.values(), vec![7]);
    }

    #[rstest]
    #[should_panic(expected = "insertion index 2 out of range")]
    fn test_insert_past_end_panics() {
        let mut tree = tree_from(&[1]);
        tree.insert(2, 5);
    }

    #[derive(Debug, Clone)]
    enum Operation {
        Insert(usize, i32),
        Remove(usize),
    }

    fn operation() -> impl Strategy<Value = Operation> {
        prop_oneof![
            3 => (any::<usize>(), any::<i32>()).prop_map(|(index, value)| Operation::Insert(index, value)),
            2 => any::<usize>().prop_map(Operation::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_vec_and_keeps_invariants(
            operations in prop::collection::vec(operation(), 0..200)
        ) {
            let mut tree = Tree::new();
            let mut model: Vec<i32> = Vec::new();
            for operation in operations {
                match operation {
                    Operation::Insert(index, value) => {
                        let index = index % (model.len() + 1);
                        let id = tree.insert(index, value);
                        model.insert(index, value);
                        prop_assert_eq!(tree.position(id), index);
                    }
                    Operation::Remove(index) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = index % model.len();
                        let removal = tree.remove(index);
                        prop_assert_eq!(removal.value, model.remove(index));
                    }
                }
                tree.check_invariants();
                prop_assert_eq!(tree.values(), model.clone());
            }
        }
    }
}
