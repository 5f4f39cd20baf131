//! Color-balanced ordered set.

use core::fmt;

use tracing::trace;

use crate::check;
use crate::error::SetError;
use crate::order::{Comparator, Order};
use crate::raw::{Handle, Link, RawTree, Search, Side};
use crate::set::{BalancedOrderedSet, Strategy};

/// Node color. An absent child (`None`) is the shared sentinel and always reads as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "R",
            Color::Black => "B",
        })
    }
}

/// An ordered set kept balanced by node colors (a red-black tree).
///
/// The root is black, no red node has a red child, and every path from a node down
/// to an absent child passes the same number of black nodes. Insertions and removals
/// restore these rules with recoloring and at most three rotations.
///
/// # Examples
///
/// ```
/// use balanced_set::{BalancedOrderedSet, RedBlackTree};
///
/// let mut set: RedBlackTree<i32> = [50, 25, 75, 100, 60, 55, 70, 65, 71, 73].into_iter().collect();
/// assert_eq!(set.size(), 10);
/// set.check_balanced()?;
///
/// assert_eq!(set.remove(&60), Ok(true));
/// assert_eq!(set.contains(&60), Ok(false));
/// set.check_balanced()?;
/// # Ok::<(), balanced_set::SetError>(())
/// ```
#[derive(Clone)]
pub struct RedBlackTree<E> {
    raw: RawTree<E, Color>,
}

impl<E: Ord> RedBlackTree<E> {
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

impl<E> RedBlackTree<E> {
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

    fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |handle| self.raw.node(handle).balance())
    }

    /// Paints a node. Painting the sentinel is a no-op: it is black for good.
    fn paint(&mut self, link: Link, color: Color) {
        if let Some(handle) = link {
            self.raw.node_mut(handle).set_balance(color);
        }
    }

    fn parent_of_red(&self, handle: Handle) -> Handle {
        self.raw
            .parent(handle)
            .expect("`RedBlackTree` - a red node below the root always has a parent!")
    }

    /// Repairs a red `node` whose parent may also be red.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.raw.parent(node)
            && self.color(Some(parent)) == Color::Red
        {
            let grandparent = self.parent_of_red(parent);
            let side = self.raw.side_of(grandparent, Some(parent));
            let uncle = self.raw.child(grandparent, side.opposite());

            if self.color(uncle) == Color::Red {
                trace!(?node, "insert fixup: red uncle, recolor");
                self.paint(Some(parent), Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.raw.side_of(parent, Some(node)) == side.opposite() {
                trace!(?node, "insert fixup: inner child, straighten");
                node = parent;
                self.raw.rotate(node, side);
                parent = self.parent_of_red(node);
            }
            trace!(?node, "insert fixup: outer child, rotate grandparent");
            self.paint(Some(parent), Color::Black);
            self.paint(Some(grandparent), Color::Red);
            self.raw.rotate(grandparent, side.opposite());
        }
        self.paint(self.raw.root(), Color::Black);
    }

    /// Restores black heights after a black node was removed. `node` holds one black
    /// too few on its paths and hangs under `parent`; it may be the sentinel.
    fn delete_fixup(&mut self, mut node: Link, mut parent: Link) {
        while node != self.raw.root() && self.color(node) == Color::Black {
            let Some(above) = parent else {
                break;
            };
            let side = self.raw.side_of(above, node);
            let mut sibling = self.sibling(above, side);

            if self.color(Some(sibling)) == Color::Red {
                trace!(?above, "delete fixup: red sibling");
                self.paint(Some(sibling), Color::Black);
                self.paint(Some(above), Color::Red);
                self.raw.rotate(above, side);
                sibling = self.sibling(above, side);
            }

            let near = self.raw.child(sibling, side);
            let far = self.raw.child(sibling, side.opposite());
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!(?above, "delete fixup: black nephews, move up");
                self.paint(Some(sibling), Color::Red);
                node = Some(above);
                parent = self.raw.parent(above);
                continue;
            }

            if self.color(far) == Color::Black {
                trace!(?above, "delete fixup: red near nephew, rotate sibling");
                self.paint(near, Color::Black);
                self.paint(Some(sibling), Color::Red);
                self.raw.rotate(sibling, side.opposite());
                sibling = self.sibling(above, side);
            }

            trace!(?above, "delete fixup: red far nephew, rotate parent");
            let parent_color = self.color(Some(above));
            self.paint(Some(sibling), parent_color);
            self.paint(Some(above), Color::Black);
            self.paint(self.raw.child(sibling, side.opposite()), Color::Black);
            self.raw.rotate(above, side);
            node = self.raw.root();
            parent = None;
        }
        self.paint(node, Color::Black);
    }

    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        self.raw
            .child(parent, side.opposite())
            .expect("`RedBlackTree` - a node short of black height always has a sibling!")
    }
}

impl<E> BalancedOrderedSet<E> for RedBlackTree<E> {
    fn insert(&mut self, value: E) -> bool {
        match self.raw.search(&value) {
            Search::Found(_) => false,
            Search::Vacant { parent, side } => {
                let node = self.raw.attach(value, Color::Red, parent, side);
                self.insert_fixup(node);
                true
            }
        }
    }

    fn delete(&mut self, value: &E) -> bool {
        let Some(target) = self.raw.find(value) else {
            return false;
        };
        let spliced = self.raw.splice(target);
        if spliced.balance == Color::Black {
            self.delete_fixup(spliced.child, spliced.parent);
        }
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
        Strategy::RedBlack
    }

    fn check_balanced(&self) -> Result<(), SetError>
    where
        E: fmt::Debug,
    {
        check::check_colors(&self.raw)
    }
}

impl<E: Ord> Default for RedBlackTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for RedBlackTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        self.raw.walk_in_order(|_, value| {
            set.entry(value);
        });
        set.finish()
    }
}

impl<E> Extend<E> for RedBlackTree<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<E: Ord> FromIterator<E> for RedBlackTree<E> {
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

    fn shape(set: &RedBlackTree<i32>) -> String {
        set.raw.dump(set.raw.root()).to_string()
    }

    fn build(values: &[i32]) -> RedBlackTree<i32> {
        let set: RedBlackTree<i32> = values.iter().copied().collect();
        set.raw.validate_links();
        assert_eq!(set.check_balanced(), Ok(()));
        set
    }

    fn color_of(set: &RedBlackTree<i32>, value: i32) -> Color {
        set.color(set.raw.find(&value))
    }

    #[test]
    fn first_insert_is_a_black_root() {
        let set = build(&[7]);
        assert_eq!(shape(&set), "N{d=7, b=B}");
    }

    #[test]
    fn red_uncle_recolors_without_rotation() {
        let set = build(&[10, 5, 15, 1]);
        assert_eq!(shape(&set), "N{d=10, b=B, l=N{d=5, b=B, l=N{d=1, b=R}}, r=N{d=15, b=B}}");
    }

    #[test]
    fn outer_child_rotates_grandparent() {
        let set = build(&[10, 20, 30]);
        assert_eq!(shape(&set), "N{d=20, b=B, l=N{d=10, b=R}, r=N{d=30, b=R}}");
    }

    #[test]
    fn inner_child_straightens_then_rotates() {
        assert_eq!(shape(&build(&[30, 10, 20])), "N{d=20, b=B, l=N{d=10, b=R}, r=N{d=30, b=R}}");
        assert_eq!(shape(&build(&[10, 30, 20])), "N{d=20, b=B, l=N{d=10, b=R}, r=N{d=30, b=R}}");
    }

    #[test]
    fn ten_element_sequence_keeps_black_root() {
        let set = build(&[50, 25, 75, 100, 60, 55, 70, 65, 71, 73]);
        assert_eq!(set.len(), 10);
        assert_eq!(set.raw.node(set.raw.root().unwrap()).balance(), Color::Black);
        assert_eq!(format!("{set:?}"), "{25, 50, 55, 60, 65, 70, 71, 73, 75, 100}");
    }

    #[test]
    fn removing_red_leaf_needs_no_fixup() {
        let mut set = build(&[10, 5, 15, 1]);
        assert!(set.delete(&1));
        assert_eq!(shape(&set), "N{d=10, b=B, l=N{d=5, b=B}, r=N{d=15, b=B}}");
    }

    #[test]
    fn removing_black_leaf_with_black_nephews_pushes_deficit_up() {
        let mut set = build(&[10, 5, 15]);
        set.paint(set.raw.find(&5), Color::Black);
        set.paint(set.raw.find(&15), Color::Black);
        assert!(set.delete(&5));
        assert_eq!(shape(&set), "N{d=10, b=B, r=N{d=15, b=R}}");
        assert_eq!(set.check_balanced(), Ok(()));
    }

    #[test]
    fn removing_black_leaf_with_red_far_nephew_rotates_parent() {
        let mut set = build(&[10, 5, 15, 20]);
        assert_eq!(color_of(&set, 20), Color::Red);
        assert!(set.delete(&5));
        assert_eq!(shape(&set), "N{d=15, b=B, l=N{d=10, b=B}, r=N{d=20, b=B}}");
    }

    #[test]
    fn removing_black_leaf_with_red_near_nephew_rotates_twice() {
        let mut set = build(&[10, 5, 15, 12]);
        assert_eq!(color_of(&set, 12), Color::Red);
        assert!(set.delete(&5));
        assert_eq!(shape(&set), "N{d=12, b=B, l=N{d=10, b=B}, r=N{d=15, b=B}}");
    }

    #[test]
    fn removing_below_red_sibling_rotates_it_up_first() {
        let mut set = build(&[10, 5, 20, 15, 25, 30]);
        assert_eq!(color_of(&set, 20), Color::Red);
        assert!(set.delete(&5));
        assert_eq!(set.check_balanced(), Ok(()));
        assert_eq!(set.raw.node(set.raw.root().unwrap()).value(), &20);
        set.raw.validate_links();
    }

    #[test]
    fn removing_two_child_root_promotes_successor() {
        let mut set = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert!(set.delete(&4));
        assert_eq!(set.len(), 6);
        assert_eq!(set.raw.node(set.raw.root().unwrap()).value(), &5);
        assert_eq!(set.check_balanced(), Ok(()));
        set.raw.validate_links();
    }

    #[test]
    fn removing_last_element_empties_tree() {
        let mut set = build(&[1, 2]);
        assert!(set.delete(&1));
        assert!(set.delete(&2));
        assert!(set.raw.root().is_none());
        assert!(!set.delete(&2));
    }

    #[test]
    fn clone_is_independent() {
        let original = build(&[1, 2, 3]);
        let mut copy = original.clone();
        assert!(copy.delete(&2));
        assert_eq!(original.len(), 3);
        assert_eq!(copy.len(), 2);
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
        fn every_mutation_keeps_colors_balanced(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut set: RedBlackTree<i16> = RedBlackTree::new();
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

        #[test]
        fn ascending_runs_stay_color_balanced(n in 1usize..2000) {
            let set: RedBlackTree<usize> = (0..n).collect();
            prop_assert_eq!(set.check_balanced(), Ok(()));
            prop_assert_eq!(set.len(), n);
        }
    }
}
