use std::iter::FusedIterator;

use crate::tree::{NodeId, Tree};

/// A borrowing iterator over a [`TreeList`](crate::TreeList), in index order.
///
/// Created by [`TreeList::iter`](crate::TreeList::iter). Each step follows one
/// thread or descends one subtree, so a full pass is O(N).
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.tree.next(id);
        Some(self.tree.value(id))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.tree.previous(id);
        Some(self.tree.value(id))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// An owning iterator over the elements of a [`TreeList`](crate::TreeList).
pub struct IntoIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(tree: Tree<T>) -> Self {
        Self {
            values: tree.into_values().into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.values.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::IndexedTreeList;
    use rstest::rstest;

    #[rstest]
    fn test_iter_meets_in_the_middle() {
        let list: IndexedTreeList<i32> = (0..5).collect();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    fn test_rev_matches_reversed_vec() {
        let list: IndexedTreeList<i32> = (0..40).collect();
        let reversed: Vec<i32> = list.iter().rev().copied().collect();
        assert_eq!(reversed, (0..40).rev().collect::<Vec<_>>());
    }

    #[rstest]
    fn test_into_iter_moves_values() {
        let list: IndexedTreeList<String> = ["x", "y", "z"].into_iter().map(String::from).collect();
        let owned: Vec<String> = list.into_iter().rev().collect();
        assert_eq!(owned, vec!["z", "y", "x"]);
    }

    #[rstest]
    fn test_empty_iter() {
        let list: IndexedTreeList<i32> = IndexedTreeList::new();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.into_iter().len(), 0);
    }
}
