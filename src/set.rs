use core::fmt;

use crate::error::SetError;
use crate::order::Comparator;

/// The balancing discipline behind a set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Height balance: sibling subtree heights differ by at most one.
    Avl,
    /// Color balance: no red node has a red child and every path carries the same
    /// number of black nodes.
    #[default]
    RedBlack,
}

/// A sorted set of unique elements that keeps itself balanced.
///
/// Implementors supply the primitives (`insert`, `delete`, `get`, `min`, `max`, ...);
/// the checked operations (`add`, `remove`, `contains`, `first`, `last`) are provided
/// on top of them, so every strategy reports missing arguments and empty sets the
/// same way.
///
/// Missing elements are expressed as `None`. Plain values convert into `Some`, so
/// `set.add(3)` and `set.contains(&3)` work directly.
///
/// # Examples
///
/// ```
/// use balanced_set::{AvlTree, BalancedOrderedSet, SetError};
///
/// let mut set: AvlTree<i32> = AvlTree::new();
/// assert_eq!(set.add(10), Ok(true));
/// assert_eq!(set.add(10), Ok(false));
/// assert_eq!(set.contains(&10), Ok(true));
/// assert_eq!(set.add(None::<i32>), Err(SetError::InvalidArgument { operation: "add" }));
///
/// assert_eq!(set.remove(&10), Ok(true));
/// assert_eq!(set.first(), Err(SetError::EmptyCollection { operation: "first" }));
/// ```
pub trait BalancedOrderedSet<E> {
    /// Inserts `value` unless an equal element is present. Returns whether it was inserted.
    ///
    /// # Complexity
    ///
    /// O(log n)
    fn insert(&mut self, value: E) -> bool;

    /// Removes the element equal to `value`. Returns whether one was present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    fn delete(&mut self, value: &E) -> bool;

    /// The stored element equal to `value`, if any.
    fn get(&self, value: &E) -> Option<&E>;

    /// The minimum element, if any.
    fn min(&self) -> Option<&E>;

    /// The maximum element, if any.
    fn max(&self) -> Option<&E>;

    /// Number of elements. O(1).
    fn len(&self) -> usize;

    /// The injected ordering; `None` means the natural [`Ord`] of `E`.
    fn comparator(&self) -> Option<&Comparator<E>>;

    /// The balancing discipline this set uses.
    fn strategy(&self) -> Strategy;

    /// Walks the whole tree and verifies ordering and the balance invariant of
    /// [`strategy`](Self::strategy).
    ///
    /// This is a verification tool; the set never needs it to stay correct.
    ///
    /// # Errors
    ///
    /// [`SetError::UnbalancedStructure`] describing the first fault found.
    fn check_balanced(&self) -> Result<(), SetError>
    where
        E: fmt::Debug;

    /// Adds `value` to the set. Returns `Ok(false)`, leaving the set untouched, if an
    /// equal element is already present.
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidArgument`] if `value` is `None`.
    fn add<V>(&mut self, value: V) -> Result<bool, SetError>
    where
        V: Into<Option<E>>,
    {
        let value = value.into().ok_or(SetError::InvalidArgument { operation: "add" })?;
        Ok(self.insert(value))
    }

    /// Removes the element equal to `value`. Returns `Ok(false)` if there is none.
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidArgument`] if `value` is `None`.
    fn remove<'a, V>(&mut self, value: V) -> Result<bool, SetError>
    where
        V: Into<Option<&'a E>>,
        E: 'a,
    {
        let value = value.into().ok_or(SetError::InvalidArgument { operation: "remove" })?;
        Ok(self.delete(value))
    }

    /// Whether an element equal to `value` is present.
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidArgument`] if `value` is `None`.
    fn contains<'a, V>(&self, value: V) -> Result<bool, SetError>
    where
        V: Into<Option<&'a E>>,
        E: 'a,
    {
        let value = value.into().ok_or(SetError::InvalidArgument { operation: "contains" })?;
        Ok(self.get(value).is_some())
    }

    /// The minimum element.
    ///
    /// # Errors
    ///
    /// [`SetError::EmptyCollection`] if the set is empty.
    fn first(&self) -> Result<&E, SetError> {
        self.min().ok_or(SetError::EmptyCollection { operation: "first" })
    }

    /// The maximum element.
    ///
    /// # Errors
    ///
    /// [`SetError::EmptyCollection`] if the set is empty.
    fn last(&self) -> Result<&E, SetError> {
        self.max().ok_or(SetError::EmptyCollection { operation: "last" })
    }

    /// Number of elements. O(1).
    fn size(&self) -> usize {
        self.len()
    }

    /// Whether the set holds no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_set::{BalancedOrderedSet, OrderedSet, Strategy};
    ///
    /// let mut set = OrderedSet::new(Strategy::Avl);
    /// assert!(set.is_empty());
    ///
    /// set.extend([4, 2, 4]);
    /// assert!(!set.is_empty());
    /// assert_eq!(set.size(), 2);
    /// assert_eq!(set.strategy(), Strategy::Avl);
    /// ```
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
