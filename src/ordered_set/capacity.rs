use super::{Inner, OrderedSet};
use crate::order::Order;
use crate::set::Strategy;

impl<E: Ord> OrderedSet<E> {
    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// Removed elements free their slots for reuse, so a set that never holds more
    /// than `capacity` elements at once never reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_set::{BalancedOrderedSet, OrderedSet, Strategy};
    ///
    /// let set: OrderedSet<i32> = OrderedSet::with_capacity(Strategy::RedBlack, 16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(strategy: Strategy, capacity: usize) -> Self {
        Self::with_order(strategy, Order::natural(), capacity)
    }
}

impl<E> OrderedSet<E> {
    /// Number of elements the set can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.inner {
            Inner::Avl(tree) => tree.capacity(),
            Inner::RedBlack(tree) => tree.capacity(),
        }
    }
}
