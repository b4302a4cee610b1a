use std::ops::{Index, IndexMut};

use super::node::{Node, NodeId};

/// Slab of tree nodes addressed by [`NodeId`].
///
/// Freed slots are kept on a free list and reused by later allocations.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn allocate(&mut self, node: Node<T>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.slot()] = Some(node);
            id
        } else {
            self.slots.push(Some(node));
            NodeId::new(self.slots.len() - 1)
        }
    }

    /// Frees a slot and hands back its node.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        match self.slots[id.slot()].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => panic!("released vacant node slot {id:?}"),
        }
    }

    /// Exchanges the values of two live nodes, leaving their links alone.
    pub(crate) fn swap_values(&mut self, first: NodeId, second: NodeId) {
        if first == second {
            return;
        }
        let (low, high) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        let (head, tail) = self.slots.split_at_mut(high.slot());
        match (&mut head[low.slot()], &mut tail[0]) {
            (Some(low_node), Some(high_node)) => {
                std::mem::swap(&mut low_node.value, &mut high_node.value);
            }
            _ => panic!("swap on vacant node slot {first:?} or {second:?}"),
        }
    }

    #[inline]
    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        self.slots.get(id.slot()).is_some_and(Option::is_some)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.slot()] {
            Some(node) => node,
            None => panic!("access to vacant node slot {id:?}"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.slot()] {
            Some(node) => node,
            None => panic!("access to vacant node slot {id:?}"),
        }
    }
}
