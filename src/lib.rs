//! # indexed-tree-list
//!
//! Lists with O(log N) positional editing and O(log N) value lookup.
//!
//! ## Overview
//!
//! A [`TreeList`] stores its elements in a positioned AVL tree and keeps a
//! hash index from each value to the node(s) holding it. Every operation a
//! list supports by position (`get`, `set`, `insert`, `remove`) is
//! logarithmic, and so is every operation by value (`contains`,
//! `index_of`, `last_index_of`, `remove_value`).
//!
//! - [`IndexedTreeList`]: duplicates allowed, every occurrence is tracked
//! - [`TreeListSet`]: each value at most once, insertion order preserved
//! - [`Cursor`]: a bidirectional, fail-fast cursor that can edit the list
//!   it walks
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` as a sequence
//! - `fxhash`: use `rustc_hash::FxBuildHasher` as the default hasher
//! - `ahash`: use `ahash::RandomState` as the default hasher
//! - `tracing`: emit `tracing` events for rebalancing and stale cursors
//! - `full`: `serde` and `tracing`
//!
//! ## Example
//!
//! ```rust
//! use indexed_tree_list::prelude::*;
//!
//! let mut list: IndexedTreeList<&str> = IndexedTreeList::new();
//! list.push("b");
//! list.push("c");
//! list.insert(0, "a").unwrap();
//! list.push("b");
//!
//! assert_eq!(list.to_vec(), vec!["a", "b", "c", "b"]);
//! assert_eq!(list.indexes("b"), vec![1, 3]);
//!
//! list.remove(1).unwrap();
//! assert_eq!(list.index_of("b"), Some(2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use indexed_tree_list::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{TreeListError, TreeListResult};
    pub use crate::index::ValueIndex;
    pub use crate::list::{Cursor, IndexedTreeList, TreeList, TreeListSet};
}

mod tracing_helpers;

pub mod error;
pub mod index;
mod list;
pub mod tree;

pub use error::{TreeListError, TreeListResult};
pub use index::{DefaultHashBuilder, MultiIndex, UniqueIndex, ValueIndex};
pub use list::{Cursor, IndexedTreeList, IntoIter, Iter, TreeList, TreeListSet};
