use core::fmt;

use crate::avl::AvlTree;
use crate::error::SetError;
use crate::order::{Comparator, Order};
use crate::red_black::RedBlackTree;
use crate::set::{BalancedOrderedSet, Strategy};

mod builder;
mod capacity;

pub use builder::Builder;

/// An ordered set whose balancing strategy is chosen at runtime.
///
/// `OrderedSet` forwards every operation to an [`AvlTree`] or a [`RedBlackTree`], so
/// callers can switch strategies without touching the code that uses the set. Both
/// strategies give the same answers; they differ only in tree shape and in how much
/// work insertions and removals do to stay balanced.
///
/// # Examples
///
/// ```
/// use balanced_set::{BalancedOrderedSet, OrderedSet, Strategy};
///
/// let mut set: OrderedSet<i32> = OrderedSet::new(Strategy::Avl);
/// for value in [40, 20, 60, 10, 30] {
///     set.add(value)?;
/// }
///
/// assert_eq!(set.strategy(), Strategy::Avl);
/// assert_eq!(set.first(), Ok(&10));
/// assert_eq!(set.last(), Ok(&60));
/// assert_eq!(format!("{set:?}"), "{10, 20, 30, 40, 60}");
/// set.check_balanced()?;
/// # Ok::<(), balanced_set::SetError>(())
/// ```
///
/// Collecting into an `OrderedSet` uses the default strategy:
///
/// ```
/// use balanced_set::{BalancedOrderedSet, OrderedSet, Strategy};
///
/// let set: OrderedSet<u8> = b"hello".iter().copied().collect();
/// assert_eq!(set.strategy(), Strategy::RedBlack);
/// assert_eq!(set.size(), 4);
/// ```
#[derive(Clone)]
pub struct OrderedSet<E> {
    inner: Inner<E>,
}

#[derive(Clone)]
enum Inner<E> {
    Avl(AvlTree<E>),
    RedBlack(RedBlackTree<E>),
}

/// Runs `$body` against whichever tree backs the set.
macro_rules! dispatch {
    ($inner:expr, $tree:ident => $body:expr) => {
        match $inner {
            Inner::Avl($tree) => $body,
            Inner::RedBlack($tree) => $body,
        }
    };
}

impl<E: Ord> OrderedSet<E> {
    /// Makes a new, empty set ordered by `E`'s [`Ord`].
    #[must_use]
    pub const fn new(strategy: Strategy) -> Self {
        let inner = match strategy {
            Strategy::Avl => Inner::Avl(AvlTree::new()),
            Strategy::RedBlack => Inner::RedBlack(RedBlackTree::new()),
        };
        Self { inner }
    }
}

impl<E> OrderedSet<E> {
    /// Makes a new, empty set ordered by `comparator`. `E` need not implement [`Ord`].
    ///
    /// ```
    /// use balanced_set::{BalancedOrderedSet, Comparator, OrderedSet, Strategy};
    ///
    /// let by_length = Comparator::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// let mut words = OrderedSet::with_comparator(Strategy::RedBlack, by_length);
    /// assert_eq!(words.add("pear"), Ok(true));
    /// assert_eq!(words.add("plum"), Ok(false));
    /// assert_eq!(words.add("fig"), Ok(true));
    /// assert_eq!(words.first(), Ok(&"fig"));
    /// ```
    #[must_use]
    pub fn with_comparator(strategy: Strategy, comparator: Comparator<E>) -> Self {
        Self::with_order(strategy, Order::custom(comparator), 0)
    }

    /// Starts configuring a set.
    ///
    /// ```
    /// use balanced_set::{BalancedOrderedSet, OrderedSet, Strategy};
    ///
    /// let set: OrderedSet<i32> = OrderedSet::builder().strategy(Strategy::Avl).capacity(64).build();
    /// assert_eq!(set.strategy(), Strategy::Avl);
    /// assert!(set.capacity() >= 64);
    /// ```
    #[must_use]
    pub fn builder() -> Builder<E> {
        Builder::new()
    }

    pub(crate) fn with_order(strategy: Strategy, order: Order<E>, capacity: usize) -> Self {
        let inner = match strategy {
            Strategy::Avl => Inner::Avl(AvlTree::with_order(order, capacity)),
            Strategy::RedBlack => Inner::RedBlack(RedBlackTree::with_order(order, capacity)),
        };
        Self { inner }
    }

    /// Removes every element. The strategy and ordering are kept.
    pub fn clear(&mut self) {
        dispatch!(&mut self.inner, tree => tree.clear());
    }
}

impl<E> BalancedOrderedSet<E> for OrderedSet<E> {
    fn insert(&mut self, value: E) -> bool {
        dispatch!(&mut self.inner, tree => tree.insert(value))
    }

    fn delete(&mut self, value: &E) -> bool {
        dispatch!(&mut self.inner, tree => tree.delete(value))
    }

    fn get(&self, value: &E) -> Option<&E> {
        dispatch!(&self.inner, tree => tree.get(value))
    }

    fn min(&self) -> Option<&E> {
        dispatch!(&self.inner, tree => tree.min())
    }

    fn max(&self) -> Option<&E> {
        dispatch!(&self.inner, tree => tree.max())
    }

    fn len(&self) -> usize {
        dispatch!(&self.inner, tree => tree.len())
    }

    fn comparator(&self) -> Option<&Comparator<E>> {
        dispatch!(&self.inner, tree => tree.comparator())
    }

    fn strategy(&self) -> Strategy {
        dispatch!(&self.inner, tree => tree.strategy())
    }

    fn check_balanced(&self) -> Result<(), SetError>
    where
        E: fmt::Debug,
    {
        dispatch!(&self.inner, tree => tree.check_balanced())
    }
}

impl<E: Ord> Default for OrderedSet<E> {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl<E: fmt::Debug> fmt::Debug for OrderedSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(&self.inner, tree => fmt::Debug::fmt(tree, f))
    }
}

impl<E> Extend<E> for OrderedSet<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        dispatch!(&mut self.inner, tree => tree.extend(iter));
    }
}

impl<E: Ord> FromIterator<E> for OrderedSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<E: Ord, const N: usize> From<[E; N]> for OrderedSet<E> {
    fn from(values: [E; N]) -> Self {
        values.into_iter().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_strategy_is_red_black() {
        let set: OrderedSet<i32> = OrderedSet::default();
        assert_eq!(set.strategy(), Strategy::RedBlack);
        assert!(set.comparator().is_none());
    }

    #[test]
    fn each_strategy_reports_itself() {
        for strategy in [Strategy::Avl, Strategy::RedBlack] {
            let set: OrderedSet<i32> = OrderedSet::new(strategy);
            assert_eq!(set.strategy(), strategy);
        }
    }

    #[test]
    fn debug_forwards_to_tree() {
        let set = OrderedSet::from([3, 1, 2]);
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");

        let empty: OrderedSet<i32> = OrderedSet::new(Strategy::Avl);
        assert_eq!(format!("{empty:?}"), "{}");
    }

    #[test]
    fn clear_keeps_strategy_and_comparator() {
        let mut set = OrderedSet::with_comparator(Strategy::Avl, Comparator::<i32>::reverse());
        set.extend([1, 2, 3]);
        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.strategy(), Strategy::Avl);
        assert!(set.comparator().is_some());
        set.extend([1, 2, 3]);
        assert_eq!(set.first(), Ok(&3));
    }
}
