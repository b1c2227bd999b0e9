//! Total orders used to place keys.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Every placement decision in the tree goes through this trait. It must
/// stay consistent for the lifetime of the tree; an inconsistent order is
/// not detected at insertion time (see [`BTree::validate`](crate::BTree::validate)).
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator:
/// ```
/// use ordtree::BTree;
///
/// let mut tree = BTree::with_comparator(2, |a: &i32, b: &i32| b.cmp(a)).unwrap();
/// for i in 0..5 {
///     tree.add(i).unwrap();
/// }
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compare `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The order given by `T: Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Flips another comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
