//! Height-balanced ordered set.

use core::fmt;

use tracing::trace;

use crate::check;
use crate::error::SetError;
use crate::order::{Comparator, Order};
use crate::raw::{Handle, Link, RawTree, Search, Side};
use crate::set::{BalancedOrderedSet, Strategy};

/// Subtree height: 0 for an absent child, 1 for a leaf. An AVL tree of `n` nodes is at
/// most about `1.44 * log2(n)` tall, so `u8` never overflows.
type Height = u8;

/// An ordered set kept balanced by subtree heights (an AVL tree).
///
/// For every node the heights of its two subtrees differ by at most one. After each
/// insertion or removal the heights on the path back to the root are recomputed and
/// any node that became two levels lopsided is fixed with a single or double rotation.
///
/// # Examples
///
/// ```
/// use balanced_set::{AvlTree, BalancedOrderedSet};
///
/// let mut set: AvlTree<i32> = AvlTree::new();
/// for value in [10, 20, 30] {
///     set.add(value)?;
/// }
///
/// assert_eq!(set.first()?, &10);
/// assert_eq!(set.last()?, &30);
/// assert_eq!(set.size(), 3);
/// set.check_balanced()?;
/// # Ok::<(), balanced_set::SetError>(())
/// ```
#[derive(Clone)]
pub struct AvlTree<E> {
    raw: RawTree<E, Height>,
}

impl<E: Ord> AvlTree<E> {
    /// Makes a new, empty set ordered by `E`'s [`Ord`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawTree::new(Order::natural()),
        }
    }

    /// Makes a new, empty set with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_order(Order::natural(), capacity)
    }
}

impl<E> AvlTree<E> {
    /// Makes a new, empty set ordered by `comparator`. `E` need not implement [`Ord`].
    #[must_use]
    pub fn with_comparator(comparator: Comparator<E>) -> Self {
        Self::with_order(Order::custom(comparator), 0)
    }

    pub(crate) fn with_order(order: Order<E>, capacity: usize) -> Self {
        Self {
            raw: RawTree::with_capacity(order, capacity),
        }
    }

    /// Number of elements the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    fn height(&self, link: Link) -> Height {
        link.map_or(0, |handle| self.raw.node(handle).balance())
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.raw.node(handle);
        let height = 1 + self.height(node.left()).max(self.height(node.right()));
        self.raw.node_mut(handle).set_balance(height);
    }

    fn rotate(&mut self, pivot: Handle, direction: Side) -> Handle {
        let top = self.raw.rotate(pivot, direction);
        self.update_height(pivot);
        self.update_height(top);
        top
    }

    /// Refreshes `handle`'s height and rotates it if one side is two levels taller.
    /// Returns the root of the subtree after any rotation.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        self.update_height(handle);
        let left = self.height(self.raw.child(handle, Side::Left));
        let right = self.height(self.raw.child(handle, Side::Right));
        if left.abs_diff(right) < 2 {
            return handle;
        }

        let heavy = if right > left { Side::Right } else { Side::Left };
        let child = self
            .raw
            .child(handle, heavy)
            .expect("`AvlTree::rebalance()` - taller side has no child!");

        // A child leaning inward needs straightening first; a level child does not.
        let inner = self.height(self.raw.child(child, heavy.opposite()));
        let outer = self.height(self.raw.child(child, heavy));
        if inner > outer {
            trace!(?handle, ?heavy, "double rotation");
            self.rotate(child, heavy);
        }
        self.rotate(handle, heavy.opposite())
    }

    /// Rebalances every node from `from` up to the root.
    fn retrace(&mut self, from: Link) {
        let mut cursor = from;
        while let Some(handle) = cursor {
            let top = self.rebalance(handle);
            cursor = self.raw.parent(top);
        }
    }
}

impl<E> BalancedOrderedSet<E> for AvlTree<E> {
    fn insert(&mut self, value: E) -> bool {
        match self.raw.search(&value) {
            Search::Found(_) => false,
            Search::Vacant { parent, side } => {
                self.raw.attach(value, 1, parent, side);
                self.retrace(parent);
                true
            }
        }
    }

    fn delete(&mut self, value: &E) -> bool {
        let Some(target) = self.raw.find(value) else {
            return false;
        };
        let spliced = self.raw.splice(target);
        self.retrace(spliced.parent);
        true
    }

    fn get(&self, value: &E) -> Option<&E> {
        self.raw.get(value)
    }

    fn min(&self) -> Option<&E> {
        self.raw.first()
    }

    fn max(&self) -> Option<&E> {
        self.raw.last()
    }

    fn len(&self) -> usize {
        self.raw.len()
    }

    fn comparator(&self) -> Option<&Comparator<E>> {
        self.raw.comparator()
    }

    fn strategy(&self) -> Strategy {
        Strategy::Avl
    }

    fn check_balanced(&self) -> Result<(), SetError>
    where
        E: fmt::Debug,
    {
        check::check_heights(&self.raw)
    }
}

impl<E: Ord> Default for AvlTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for AvlTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        self.raw.walk_in_order(|_, value| {
            set.entry(value);
        });
        set.finish()
    }
}

impl<E> Extend<E> for AvlTree<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<E: Ord> FromIterator<E> for AvlTree<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use proptest::strategy::Strategy;

    fn shape(set: &AvlTree<i32>) -> String {
        set.raw.dump(set.raw.root()).to_string()
    }

    fn build(values: &[i32]) -> AvlTree<i32> {
        let set: AvlTree<i32> = values.iter().copied().collect();
        set.raw.validate_links();
        assert_eq!(set.check_balanced(), Ok(()));
        set
    }

    #[test]
    fn ascending_triple_rotates_left_at_first_node() {
        let set = build(&[10, 20, 30]);
        assert_eq!(shape(&set), "N{d=20, b=2, l=N{d=10, b=1}, r=N{d=30, b=1}}");
        assert_eq!(set.first(), Ok(&10));
        assert_eq!(set.last(), Ok(&30));
    }

    #[test]
    fn descending_triple_rotates_right() {
        let set = build(&[30, 20, 10]);
        assert_eq!(shape(&set), "N{d=20, b=2, l=N{d=10, b=1}, r=N{d=30, b=1}}");
    }

    #[test]
    fn zig_zag_inserts_use_double_rotations() {
        assert_eq!(shape(&build(&[10, 30, 20])), "N{d=20, b=2, l=N{d=10, b=1}, r=N{d=30, b=1}}");
        assert_eq!(shape(&build(&[30, 10, 20])), "N{d=20, b=2, l=N{d=10, b=1}, r=N{d=30, b=1}}");
    }

    #[test]
    fn rotation_below_root_keeps_parent_link() {
        let set = build(&[50, 25, 75, 100, 125]);
        assert_eq!(
            shape(&set),
            "N{d=50, b=3, l=N{d=25, b=1}, r=N{d=100, b=2, l=N{d=75, b=1}, r=N{d=125, b=1}}}"
        );
    }

    #[test]
    fn duplicate_insert_is_rejected_without_change() {
        let mut set = build(&[2, 1, 3]);
        let before = shape(&set);
        assert!(!set.insert(2));
        assert_eq!(set.len(), 3);
        assert_eq!(shape(&set), before);
    }

    #[test]
    fn removal_unbalancing_root_rotates_once() {
        let mut set = build(&[20, 10, 30, 40]);
        assert!(set.delete(&10));
        assert_eq!(shape(&set), "N{d=30, b=2, l=N{d=20, b=1}, r=N{d=40, b=1}}");
        set.raw.validate_links();
    }

    #[test]
    fn removal_with_inward_leaning_sibling_rotates_twice() {
        let mut set = build(&[20, 10, 30, 25]);
        assert!(set.delete(&10));
        assert_eq!(shape(&set), "N{d=25, b=2, l=N{d=20, b=1}, r=N{d=30, b=1}}");
        set.raw.validate_links();
    }

    #[test]
    fn removal_with_level_sibling_prefers_single_rotation() {
        let mut set = build(&[20, 10, 30, 25, 35]);
        assert!(set.delete(&10));
        assert_eq!(shape(&set), "N{d=30, b=3, l=N{d=20, b=2, r=N{d=25, b=1}}, r=N{d=35, b=1}}");
        assert_eq!(set.check_balanced(), Ok(()));
    }

    #[test]
    fn removing_two_child_root_promotes_successor() {
        let mut set = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert!(set.delete(&4));
        assert_eq!(set.len(), 6);
        assert_eq!(shape(&set), "N{d=5, b=3, l=N{d=2, b=2, l=N{d=1, b=1}, r=N{d=3, b=1}}, r=N{d=6, b=2, r=N{d=7, b=1}}}");
        assert_eq!(set.check_balanced(), Ok(()));
    }

    #[test]
    fn removing_only_element_empties_tree() {
        let mut set = build(&[1]);
        assert!(set.delete(&1));
        assert!(set.raw.root().is_none());
        assert_eq!(set.first(), Err(SetError::EmptyCollection { operation: "first" }));
    }

    #[test]
    fn removing_missing_element_changes_nothing() {
        let mut set = build(&[5, 3, 8]);
        let before = shape(&set);
        assert!(!set.delete(&4));
        assert_eq!(shape(&set), before);
    }

    #[test]
    fn sequential_inserts_stay_logarithmic() {
        let set: AvlTree<i32> = (0..4095).collect();
        assert_eq!(set.check_balanced(), Ok(()));
        assert!(set.height(set.raw.root()) <= 17);
    }

    #[test]
    fn debug_lists_elements_in_order() {
        let set = build(&[3, 1, 2]);
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");
    }

    #[test]
    fn clear_then_reuse() {
        let mut set = build(&[1, 2, 3, 4]);
        set.clear();
        assert_eq!(set.len(), 0);
        assert!(set.insert(9));
        assert_eq!(set.check_balanced(), Ok(()));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i16),
        Delete(i16),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (-300i16..300).prop_map(Op::Insert),
            2 => (-300i16..300).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn every_mutation_keeps_heights_balanced(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut set: AvlTree<i16> = AvlTree::new();
            let mut model = BTreeSet::new();

            for op in &ops {
                match *op {
                    Op::Insert(v) => {
                        prop_assert_eq!(set.insert(v), model.insert(v));
                    }
                    Op::Delete(v) => {
                        prop_assert_eq!(set.delete(&v), model.remove(&v));
                    }
                }
                prop_assert_eq!(set.check_balanced(), Ok(()), "after {:?}", op);
                prop_assert_eq!(set.len(), model.len());
                prop_assert_eq!(set.min(), model.first());
                prop_assert_eq!(set.max(), model.last());
                set.raw.validate_links();
            }

            let mut walked = Vec::new();
            set.raw.walk_in_order(|_, &value| walked.push(value));
            prop_assert_eq!(walked, model.into_iter().collect::<Vec<_>>());
        }
    }
}
