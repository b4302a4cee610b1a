//! Error types for tree lists and their cursors.
//!
//! Every fallible operation in this crate reports a [`TreeListError`]. Errors
//! are always raised before any mutation starts, so a collection that returned
//! an error is left exactly as it was before the call.

/// Errors returned by [`TreeList`](crate::TreeList) and
/// [`Cursor`](crate::Cursor) operations.
///
/// # Examples
///
/// ```rust
/// use indexed_tree_list::{IndexedTreeList, TreeListError};
///
/// let list: IndexedTreeList<i32> = IndexedTreeList::new();
/// assert_eq!(
///     list.get(3),
///     Err(TreeListError::IndexOutOfRange { index: 3, len: 0 })
/// );
/// assert_eq!(
///     format!("{}", TreeListError::IndexOutOfRange { index: 3, len: 0 }),
///     "index 3 out of range for length 0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeListError {
    /// A positional argument fell outside the valid interval.
    ///
    /// Element positions are valid in `[0, len)`, insertion points and cursor
    /// start positions in `[0, len]`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The length of the collection at the time of the call.
        len: usize,
    },
    /// The supplied value cannot be stored by this collection.
    InvalidArgument {
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A cursor was used after the collection was structurally modified
    /// through another path.
    ConcurrentStructuralChange {
        /// The generation the cursor was synchronized with.
        expected: u64,
        /// The generation of the collection.
        actual: u64,
    },
    /// A cursor `remove` or `set` was issued with no element to act on.
    ///
    /// This happens before the first `next`/`previous` call and after a
    /// cursor `remove` or `add`.
    NoCurrentElement,
}

impl std::fmt::Display for TreeListError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(formatter, "index {index} out of range for length {len}")
            }
            Self::InvalidArgument { reason } => write!(formatter, "invalid argument: {reason}"),
            Self::ConcurrentStructuralChange { expected, actual } => write!(
                formatter,
                "collection was structurally modified (cursor generation {expected}, collection generation {actual})"
            ),
            Self::NoCurrentElement => {
                formatter.write_str("cursor has no current element; call next or previous first")
            }
        }
    }
}

impl std::error::Error for TreeListError {}

/// Result alias used throughout the crate.
pub type TreeListResult<T> = Result<T, TreeListError>;
