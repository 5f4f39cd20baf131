use alloc::sync::Arc;
use core::cmp::Ordering;
use core::fmt;

/// An injected three-way comparison, used in place of the element's natural [`Ord`].
///
/// A `Comparator` is cheap to clone; clones share the same closure.
///
/// # Examples
///
/// ```
/// use balanced_set::{BalancedOrderedSet, Comparator, RedBlackTree};
///
/// let by_length = Comparator::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// let mut words = RedBlackTree::with_comparator(by_length);
///
/// assert_eq!(words.add("pear"), Ok(true));
/// // Same length as "pear", so it is a duplicate under this ordering.
/// assert_eq!(words.add("plum"), Ok(false));
/// assert_eq!(words.add("fig"), Ok(true));
/// assert_eq!(words.first(), Ok(&"fig"));
/// ```
pub struct Comparator<E> {
    compare: Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>,
}

impl<E> Comparator<E> {
    /// Wraps a comparison closure. It must describe a total order.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    /// The descending counterpart of the natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_set::{AvlTree, BalancedOrderedSet, Comparator};
    ///
    /// let mut set: AvlTree<i32> = AvlTree::with_comparator(Comparator::reverse());
    /// set.extend([1, 2, 3]);
    /// assert_eq!(set.first(), Ok(&3));
    /// ```
    #[must_use]
    pub fn reverse() -> Self
    where
        E: Ord + 'static,
    {
        Self::new(|a: &E, b: &E| b.cmp(a))
    }

    /// Compares `a` with `b`.
    #[inline]
    #[must_use]
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<E> Clone for Comparator<E> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<E> fmt::Debug for Comparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

/// The ordering a tree was built with: `E`'s own `Ord`, or an injected comparator.
///
/// Only the natural variant needs `E: Ord`, and only to be constructed; comparing
/// through either variant works for any `E`.
pub(crate) enum Order<E> {
    Natural(fn(&E, &E) -> Ordering),
    Custom(Comparator<E>),
}

impl<E: Ord> Order<E> {
    pub(crate) const fn natural() -> Self {
        Self::Natural(E::cmp)
    }
}

impl<E> Order<E> {
    pub(crate) const fn custom(comparator: Comparator<E>) -> Self {
        Self::Custom(comparator)
    }

    pub(crate) fn comparator(&self) -> Option<&Comparator<E>> {
        match self {
            Self::Natural(_) => None,
            Self::Custom(comparator) => Some(comparator),
        }
    }

    #[inline]
    pub(crate) fn compare(&self, a: &E, b: &E) -> Ordering {
        match self {
            Self::Natural(cmp) => cmp(a, b),
            Self::Custom(comparator) => comparator.compare(a, b),
        }
    }
}

impl<E> Clone for Order<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Natural(cmp) => Self::Natural(*cmp),
            Self::Custom(comparator) => Self::Custom(comparator.clone()),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use core::cmp::Ordering::{Equal, Greater, Less};
    use proptest::prelude::*;

    #[test]
    fn natural_order_uses_ord() {
        let order = Order::natural();
        assert_eq!(order.compare(&1, &2), Less);
        assert_eq!(order.compare(&2, &2), Equal);
        assert!(order.comparator().is_none());
    }

    #[test]
    fn injected_comparator_wins_over_ord() {
        let order = Order::custom(Comparator::new(|a: &i32, b: &i32| a.abs().cmp(&b.abs())));
        assert_eq!(order.compare(&-3, &2), Greater);
        assert_eq!(order.compare(&-2, &2), Equal);
        assert!(order.comparator().is_some());
    }

    #[test]
    fn clones_share_the_closure() {
        let comparator = Comparator::<u8>::reverse();
        let clone = comparator.clone();
        assert_eq!(Arc::strong_count(&comparator.compare), 2);
        assert_eq!(clone.compare(&1, &2), Greater);
        assert_eq!(format!("{clone:?}"), "Comparator(..)");
    }

    proptest! {
        #[test]
        fn reverse_is_antisymmetric_to_natural(a in any::<i64>(), b in any::<i64>()) {
            let reverse = Comparator::reverse();
            prop_assert_eq!(reverse.compare(&a, &b), a.cmp(&b).reverse());
        }
    }
}
