//! Tree vertices and their handles.

use std::fmt;

/// Handle to a node slot in a [`Tree`](super::Tree) arena.
///
/// Handles are plain indices. They stay attached to the same element across
/// rotations and position shifts, and are only invalidated when the element
/// is removed or the tree is cleared.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Returns the arena slot this handle refers to.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "NodeId({})", self.0)
    }
}

static_assertions::assert_impl_all!(NodeId: Copy, Send, Sync);

/// A vertex of the positioned AVL tree.
///
/// `left` and `right` hold either a real subtree or, when the matching thread
/// flag is set, the in-order predecessor and successor. A thread is `None` at
/// the two ends of the sequence.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    /// Offset from the parent's index. The root holds its absolute index.
    pub(crate) relative_position: isize,
    pub(crate) height: i32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) left_is_thread: bool,
    pub(crate) right_is_thread: bool,
    pub(crate) parent: Option<NodeId>,
}

impl<T> Node<T> {
    /// Creates a leaf threaded to its neighbours.
    pub(crate) const fn leaf(
        relative_position: isize,
        value: T,
        previous: Option<NodeId>,
        next: Option<NodeId>,
    ) -> Self {
        Self {
            value,
            relative_position,
            height: 0,
            left: previous,
            right: next,
            left_is_thread: true,
            right_is_thread: true,
            parent: None,
        }
    }

    /// Returns the left child, or `None` if the left link is a thread.
    #[inline]
    pub(crate) const fn left_subtree(&self) -> Option<NodeId> {
        if self.left_is_thread { None } else { self.left }
    }

    /// Returns the right child, or `None` if the right link is a thread.
    #[inline]
    pub(crate) const fn right_subtree(&self) -> Option<NodeId> {
        if self.right_is_thread { None } else { self.right }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("value", &self.value)
            .field("relative_position", &self.relative_position)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("left_is_thread", &self.left_is_thread)
            .field("right", &self.right)
            .field("right_is_thread", &self.right_is_thread)
            .field("parent", &self.parent)
            .finish()
    }
}
