//! Any number of nodes per value.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use smallvec::SmallVec;

use super::{DefaultHashBuilder, ValueIndex};
use crate::tree::{NodeId, Relocation, Tree};

/// Nodes holding one value, sorted by live position.
///
/// Most values occur once or twice, so buckets stay inline.
type Bucket = SmallVec<[NodeId; 2]>;

/// A [`ValueIndex`] that tracks every occurrence of a value.
///
/// Backs [`IndexedTreeList`](crate::IndexedTreeList). Each bucket keeps its
/// nodes ordered by their *current* position. The order is established by
/// binary search over `Tree::position` when a node is registered and never
/// goes stale, because insertions and removals shift positions without
/// reordering the surviving nodes.
///
/// | Operation    | Complexity            |
/// |--------------|-----------------------|
/// | `register`   | O(log K · log N + K)  |
/// | `unregister` | O(log K · log N + K)  |
/// | `first`      | O(1)                  |
/// | `positions`  | O(K · log N)          |
///
/// where K is the number of occurrences of the value.
#[derive(Clone)]
pub struct MultiIndex<T, S = DefaultHashBuilder> {
    buckets: HashMap<T, Bucket, S>,
    entries: usize,
}

impl<T, S: Default> MultiIndex<T, S> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            buckets: HashMap::default(),
            entries: 0,
        }
    }
}

impl<T, S> MultiIndex<T, S> {
    /// Creates an empty index using `hasher` to hash values.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: HashMap::with_hasher(hasher),
            entries: 0,
        }
    }

    /// Returns the hasher of the underlying map.
    pub fn hasher(&self) -> &S {
        self.buckets.hasher()
    }

    /// Returns the number of distinct values.
    pub fn distinct(&self) -> usize {
        self.buckets.len()
    }
}

impl<T, S> MultiIndex<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns the positions of every node holding `value`, ascending.
    pub fn positions<Q>(&self, tree: &Tree<T>, value: &Q) -> Vec<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.get(value).map_or_else(Vec::new, |bucket| {
            bucket.iter().map(|&id| tree.position(id)).collect()
        })
    }

    /// Returns the number of nodes holding `value`.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.get(value).map_or(0, SmallVec::len)
    }
}

impl<T, S: Default> Default for MultiIndex<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> ValueIndex<T> for MultiIndex<T, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher,
{
    fn admits(&self, _value: &T, _replacing: Option<NodeId>) -> bool {
        true
    }

    fn register(&mut self, tree: &Tree<T>, id: NodeId) {
        let value = tree.value(id);
        self.entries += 1;
        let Some(bucket) = self.buckets.get_mut(value) else {
            self.buckets.insert(value.clone(), smallvec::smallvec![id]);
            return;
        };
        let position = tree.position(id);
        let slot = bucket.partition_point(|&other| tree.position(other) < position);
        bucket.insert(slot, id);
    }

    fn unregister(&mut self, tree: &Tree<T>, id: NodeId) {
        let value = tree.value(id);
        let Some(bucket) = self.buckets.get_mut(value) else {
            unreachable!("unregistered node {id:?} has no bucket")
        };
        let position = tree.position(id);
        let slot = bucket.partition_point(|&other| tree.position(other) < position);
        debug_assert_eq!(bucket.get(slot), Some(&id), "bucket out of order");
        bucket.remove(slot);
        self.entries -= 1;
        if bucket.is_empty() {
            self.buckets.remove(value);
        }
    }

    fn relocate(&mut self, tree: &Tree<T>, relocation: Relocation) {
        let Relocation { from, to } = relocation;
        let Some(bucket) = self.buckets.get_mut(tree.value(to)) else {
            unreachable!("relocated value has no bucket")
        };
        // `from` is already freed, so it must not be asked for a position.
        let position = tree.position(to);
        let slot = bucket.partition_point(|&other| other != from && tree.position(other) < position);
        match bucket.get_mut(slot) {
            Some(entry) if *entry == from => *entry = to,
            _ => unreachable!("relocated node {from:?} missing from its bucket"),
        }
    }

    fn first<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.get(value).and_then(|bucket| bucket.first().copied())
    }

    fn last<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets.get(value).and_then(|bucket| bucket.last().copied())
    }

    fn len(&self) -> usize {
        self.entries
    }

    fn clear(&mut self) {
        self.buckets.clear();
        self.entries = 0;
    }
}

impl<T: fmt::Debug, S> fmt::Debug for MultiIndex<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.buckets.iter()).finish()
    }
}
