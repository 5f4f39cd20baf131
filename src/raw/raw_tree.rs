use core::cmp::Ordering;
use core::fmt;

use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Link, Node, Side};
use crate::order::{Comparator, Order};

/// Explicit stack for in-order walks. Balanced trees stay shallow, so this rarely spills.
type Stack = SmallVec<[Handle; 48]>;

/// The binary search tree shared by both balancing strategies.
///
/// It knows how to search, attach, splice and rotate while keeping child and
/// parent links consistent. It knows nothing about heights or colors; the
/// strategies keep `B` up to date around these primitives.
#[derive(Clone)]
pub(crate) struct RawTree<E, B> {
    /// Every node of the tree.
    nodes: Arena<Node<E, B>>,
    /// `None` when the tree is empty.
    root: Link,
    order: Order<E>,
}

/// What [`RawTree::splice`] removed and where the hole is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Spliced<B> {
    /// Parent of the removed node; rebalancing starts here.
    pub(crate) parent: Link,
    /// The child that moved up into the removed node's place.
    pub(crate) child: Link,
    /// Balance metadata of the removed node.
    pub(crate) balance: B,
}

/// Outcome of a descent looking for an element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Search {
    /// An equal element lives at this node.
    Found(Handle),
    /// No equal element; a new node belongs at `side` of `parent` (or at the root).
    Vacant { parent: Link, side: Side },
}

impl<E, B: Copy> RawTree<E, B> {
    pub(crate) const fn new(order: Order<E>) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            order,
        }
    }

    pub(crate) fn with_capacity(order: Order<E>, capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            order,
        }
    }

    /// Number of elements, which is the number of live nodes.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    #[inline]
    pub(crate) fn root(&self) -> Link {
        self.root
    }

    pub(crate) fn comparator(&self) -> Option<&Comparator<E>> {
        self.order.comparator()
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<E, B> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<E, B> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Link {
        self.node(handle).parent()
    }

    #[inline]
    pub(crate) fn child(&self, handle: Handle, side: Side) -> Link {
        self.node(handle).child(side)
    }

    /// Which side of `parent` holds `child`.
    #[inline]
    pub(crate) fn side_of(&self, parent: Handle, child: Link) -> Side {
        if self.node(parent).left() == child { Side::Left } else { Side::Right }
    }

    /// Follows `side` links from `handle` to the end of that spine.
    pub(crate) fn spine_end(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.child(handle, side) {
            handle = next;
        }
        handle
    }

    /// The minimum element.
    pub(crate) fn first(&self) -> Option<&E> {
        let end = self.spine_end(self.root?, Side::Left);
        Some(self.node(end).value())
    }

    /// The maximum element.
    pub(crate) fn last(&self) -> Option<&E> {
        let end = self.spine_end(self.root?, Side::Right);
        Some(self.node(end).value())
    }

    /// The node whose value replaces `handle`'s when `handle` has two children:
    /// the leftmost node of its right subtree. `None` if there is no right subtree.
    pub(crate) fn successor_below(&self, handle: Handle) -> Link {
        let right = self.node(handle).right()?;
        Some(self.spine_end(right, Side::Left))
    }

    /// Creates a node holding `value` at a vacant position found by [`RawTree::search`].
    pub(crate) fn attach(&mut self, value: E, balance: B, parent: Link, side: Side) -> Handle {
        let handle = self.nodes.alloc(Node::new(value, balance, parent));
        match parent {
            Some(parent) => self.node_mut(parent).set_child(side, Some(handle)),
            None => self.root = Some(handle),
        }
        handle
    }

    /// Puts `replacement` where `old` hangs from its parent (or at the root).
    ///
    /// `old` keeps its own links; the caller either frees it or re-links it.
    pub(crate) fn transplant(&mut self, old: Handle, replacement: Link) {
        let parent = self.parent(old);
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, Some(old));
                self.node_mut(parent).set_child(side, replacement);
            }
            None => self.root = replacement,
        }
        if let Some(replacement) = replacement {
            self.node_mut(replacement).set_parent(parent);
        }
    }

    /// Releases a node that has already been unlinked, returning its value.
    pub(crate) fn free(&mut self, handle: Handle) -> E {
        self.nodes.take(handle).into_value()
    }

    /// Removes the element at `target` and drops it.
    ///
    /// A node with two children absorbs the value of its in-order successor and the
    /// successor's node (which has no left child) is removed instead. The removed
    /// node always has at most one child, which takes its place.
    pub(crate) fn splice(&mut self, target: Handle) -> Spliced<B> {
        let doomed = match self.successor_below(target) {
            Some(successor) if self.node(target).has_two_children() => successor,
            _ => target,
        };
        let node = self.node(doomed);
        let spliced = Spliced {
            parent: node.parent(),
            child: node.only_child(),
            balance: node.balance(),
        };

        self.transplant(doomed, spliced.child);
        let value = self.free(doomed);
        if doomed != target {
            self.node_mut(target).replace_value(value);
        }
        spliced
    }

    /// Rotates `pivot` down towards `direction`; its child on the other side takes its
    /// place. Returns that child, the new root of the subtree.
    ///
    /// ```text
    ///       pivot                 lifted
    ///       /   \    rotate       /    \
    ///      a   lifted  Left     pivot   c
    ///          /   \    =>      /   \
    ///       inner   c          a   inner
    /// ```
    pub(crate) fn rotate(&mut self, pivot: Handle, direction: Side) -> Handle {
        let lifted = self
            .child(pivot, direction.opposite())
            .expect("`RawTree::rotate()` - pivot has no child to lift!");
        trace!(?pivot, ?lifted, ?direction, "rotate");

        let inner = self.child(lifted, direction);
        self.node_mut(pivot).set_child(direction.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(pivot));
        }

        self.transplant(pivot, Some(lifted));
        self.node_mut(lifted).set_child(direction, Some(pivot));
        self.node_mut(pivot).set_parent(Some(lifted));
        lifted
    }

    /// Visits every node in ascending order.
    pub(crate) fn walk_in_order<'a>(&'a self, mut visit: impl FnMut(Handle, &'a E)) {
        let mut stack = Stack::new();
        let mut cursor = self.root;
        loop {
            while let Some(handle) = cursor {
                stack.push(handle);
                cursor = self.node(handle).left();
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.node(handle);
            visit(handle, node.value());
            cursor = node.right();
        }
    }

    /// Structural text of the subtree at `at`, used in checker reports.
    pub(crate) fn dump(&self, at: Link) -> Dump<'_, E, B> {
        Dump { tree: self, at }
    }

    #[inline]
    pub(crate) fn compare(&self, a: &E, b: &E) -> Ordering {
        self.order.compare(a, b)
    }

    pub(crate) fn search(&self, value: &E) -> Search {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            side = match self.compare(value, self.node(handle).value()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(handle),
            };
            parent = Some(handle);
            cursor = self.child(handle, side);
        }
        Search::Vacant { parent, side }
    }

    pub(crate) fn find(&self, value: &E) -> Option<Handle> {
        match self.search(value) {
            Search::Found(handle) => Some(handle),
            Search::Vacant { .. } => None,
        }
    }

    pub(crate) fn get(&self, value: &E) -> Option<&E> {
        self.find(value).map(|handle| self.node(handle).value())
    }
}

/// Renders a subtree as `N{d=value, b=balance, l=.., r=..}`; absent children are omitted.
pub(crate) struct Dump<'a, E, B> {
    tree: &'a RawTree<E, B>,
    at: Link,
}

impl<E: fmt::Debug, B: Copy + fmt::Display> fmt::Display for Dump<'_, E, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(handle) = self.at else {
            return f.write_str("nil");
        };
        let node = self.tree.node(handle);
        write!(f, "N{{d={:?}, b={}", node.value(), node.balance())?;
        if let Some(left) = node.left() {
            write!(f, ", l={}", self.tree.dump(Some(left)))?;
        }
        if let Some(right) = node.right() {
            write!(f, ", r={}", self.tree.dump(Some(right)))?;
        }
        f.write_str("}")
    }
}
