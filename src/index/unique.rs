//! One node per value.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::{DefaultHashBuilder, ValueIndex};
use crate::tree::{NodeId, Relocation, Tree};

/// A [`ValueIndex`] that allows each value at most once.
///
/// Backs [`TreeListSet`](crate::TreeListSet). `first` and `last` always
/// agree.
#[derive(Clone)]
pub struct UniqueIndex<T, S = DefaultHashBuilder> {
    nodes: HashMap<T, NodeId, S>,
}

impl<T, S: Default> UniqueIndex<T, S> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::default(),
        }
    }
}

impl<T, S> UniqueIndex<T, S> {
    /// Creates an empty index using `hasher` to hash values.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            nodes: HashMap::with_hasher(hasher),
        }
    }

    /// Returns the hasher of the underlying map.
    pub fn hasher(&self) -> &S {
        self.nodes.hasher()
    }
}

impl<T, S: Default> Default for UniqueIndex<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ValueIndex<T> for UniqueIndex<T, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    fn admits(&self, value: &T, replacing: Option<NodeId>) -> bool {
        match self.nodes.get(value) {
            None => true,
            Some(existing) => Some(*existing) == replacing,
        }
    }

    fn register(&mut self, tree: &Tree<T>, id: NodeId) {
        let previous = self.nodes.insert(tree.value(id).clone(), id);
        debug_assert!(previous.is_none(), "duplicate value registered at {id:?}");
    }

    fn unregister(&mut self, tree: &Tree<T>, id: NodeId) {
        let removed = self.nodes.remove(tree.value(id));
        debug_assert_eq!(removed, Some(id), "unregistered node was not indexed");
    }

    fn relocate(&mut self, tree: &Tree<T>, relocation: Relocation) {
        match self.nodes.get_mut(tree.value(relocation.to)) {
            Some(slot) if *slot == relocation.from => *slot = relocation.to,
            _ => unreachable!("relocated value was not indexed at {:?}", relocation.from),
        }
    }

    fn first<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.nodes.get(value).copied()
    }

    fn last<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.first(value)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<T: fmt::Debug, S> fmt::Debug for UniqueIndex<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.nodes.iter()).finish()
    }
}
