//! Value-to-node indexes.
//!
//! A [`ValueIndex`] maps each stored value to the tree node(s) that hold it,
//! which gives [`TreeList`](crate::TreeList) O(1) average `contains` and
//! O(log N) `index_of` without walking the tree. Indexes store [`NodeId`]
//! handles, never positions, because positions shift under every insertion,
//! removal and rotation.
//!
//! Two policies are provided:
//!
//! - [`UniqueIndex`]: one node per value, duplicates are rejected (set semantics)
//! - [`MultiIndex`]: a position-ordered bucket of nodes per value (list semantics)
//!
//! # Hashing
//!
//! The default hasher is selected at compile time:
//!
//! | Features             | [`DefaultHashBuilder`]                       |
//! |----------------------|----------------------------------------------|
//! | none                 | `std::collections::hash_map::RandomState`    |
//! | `fxhash`             | `rustc_hash::FxBuildHasher`                  |
//! | `ahash` only         | `ahash::RandomState`                         |
//!
//! `FxHash` is not HashDoS-resistant. Only enable `fxhash` for trusted input.
//! Any other [`BuildHasher`](std::hash::BuildHasher) can be supplied through
//! the `with_hasher` constructors.

mod multi;
mod unique;

use std::borrow::Borrow;
use std::hash::Hash;

pub use multi::MultiIndex;
pub use unique::UniqueIndex;

use crate::tree::{NodeId, Relocation, Tree};

/// The hasher used when none is given explicitly.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// The hasher used when none is given explicitly.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hasher used when none is given explicitly.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

/// A side table from values to the tree nodes holding them.
///
/// Implementations are driven by [`TreeList`](crate::TreeList), which calls
/// them in the same operation as the tree mutation:
///
/// - [`register`](Self::register) after a node is inserted or given a new value
/// - [`unregister`](Self::unregister) before a node is removed or given a new value
/// - [`relocate`](Self::relocate) after a removal moved a value between slots
///
/// The `tree` argument is always structurally consistent when these are
/// called, so implementations may ask it for live positions.
pub trait ValueIndex<T> {
    /// Returns `true` if `value` may be stored in the node `replacing`
    /// (`None` for a new node).
    fn admits(&self, value: &T, replacing: Option<NodeId>) -> bool;

    /// Records that node `id` holds `tree.value(id)`.
    fn register(&mut self, tree: &Tree<T>, id: NodeId);

    /// Forgets node `id`, which still holds the value it was registered with.
    fn unregister(&mut self, tree: &Tree<T>, id: NodeId);

    /// Re-points the entry of the value now stored at `relocation.to`.
    fn relocate(&mut self, tree: &Tree<T>, relocation: Relocation);

    /// Returns the node with the smallest position holding `value`.
    fn first<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns the node with the largest position holding `value`.
    fn last<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns `true` if any node holds `value`.
    fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.first(value).is_some()
    }

    /// Returns the number of registered nodes.
    fn len(&self) -> usize;

    /// Returns `true` if no node is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every node.
    fn clear(&mut self);
}
