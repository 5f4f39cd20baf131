use core::fmt;

use super::OrderedSet;
use crate::order::{Comparator, Order};
use crate::set::Strategy;

/// Configures an [`OrderedSet`] before it is created.
///
/// Unset options fall back to the default [`Strategy`], the natural [`Ord`] of `E`,
/// and no preallocated capacity.
///
/// # Examples
///
/// ```
/// use balanced_set::{BalancedOrderedSet, Comparator, OrderedSet, Strategy};
///
/// let mut set = OrderedSet::builder()
///     .strategy(Strategy::Avl)
///     .comparator(Comparator::<i32>::reverse())
///     .capacity(8)
///     .build();
///
/// set.extend([1, 5, 3]);
/// assert_eq!(set.first(), Ok(&5));
/// assert_eq!(set.strategy(), Strategy::Avl);
/// ```
#[must_use = "a builder does nothing until `build()` is called"]
pub struct Builder<E> {
    strategy: Strategy,
    comparator: Option<Comparator<E>>,
    capacity: usize,
}

impl<E> Builder<E> {
    pub(crate) fn new() -> Self {
        Self {
            strategy: Strategy::default(),
            comparator: None,
            capacity: 0,
        }
    }

    /// Selects the balancing strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Orders elements with `comparator` instead of `E`'s [`Ord`].
    pub fn comparator(mut self, comparator: Comparator<E>) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Reserves room for at least `capacity` elements.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Creates the empty set.
    ///
    /// `E: Ord` is needed for the fallback when no comparator was given. Types without
    /// an `Ord` go through [`OrderedSet::with_comparator`] instead.
    pub fn build(self) -> OrderedSet<E>
    where
        E: Ord,
    {
        let order = self.comparator.map_or_else(Order::natural, Order::custom);
        OrderedSet::with_order(self.strategy, order, self.capacity)
    }
}

impl<E> Clone for Builder<E> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy,
            comparator: self.comparator.clone(),
            capacity: self.capacity,
        }
    }
}

impl<E> Default for Builder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Builder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("strategy", &self.strategy)
            .field("comparator", &self.comparator)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::set::BalancedOrderedSet;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_default_set() {
        let set: OrderedSet<i32> = OrderedSet::builder().build();
        assert_eq!(set.strategy(), Strategy::RedBlack);
        assert!(set.comparator().is_none());
        assert_eq!(set.capacity(), 0);
    }

    #[test]
    fn every_option_reaches_the_set() {
        let set: OrderedSet<i32> = OrderedSet::builder()
            .capacity(16)
            .comparator(Comparator::reverse())
            .strategy(Strategy::Avl)
            .build();

        assert_eq!(set.strategy(), Strategy::Avl);
        assert!(set.comparator().is_some());
        assert!(set.capacity() >= 16);
    }

    #[test]
    fn debug_lists_options() {
        let builder: Builder<i32> = Builder::default().comparator(Comparator::reverse());
        assert_eq!(
            format!("{builder:?}"),
            "Builder { strategy: RedBlack, comparator: Some(Comparator(..)), capacity: 0 }"
        );
    }

    #[test]
    fn clone_builds_independent_sets() {
        let builder = OrderedSet::<i32>::builder().strategy(Strategy::Avl);
        let mut first = builder.clone().build();
        let second = builder.build();

        first.extend([1, 2]);
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 0);
    }
}
