use core::mem;

use super::handle::Handle;

/// A child or parent position: `None` when there is no node there.
pub(crate) type Link = Option<Handle>;

/// Which child of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node. `B` is the balance metadata: a subtree height for AVL, a
/// [`Color`](crate::red_black::Color) for red-black.
///
/// Children are owned through the arena; `parent` is a plain back-reference used
/// to walk upward during rebalancing.
#[derive(Clone)]
pub(crate) struct Node<E, B> {
    value: E,
    left: Link,
    right: Link,
    parent: Link,
    balance: B,
}

impl<E, B: Copy> Node<E, B> {
    pub(crate) const fn new(value: E, balance: B, parent: Link) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
            balance,
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> &E {
        &self.value
    }

    /// Overwrites the payload, keeping the node's place in the tree.
    pub(crate) fn replace_value(&mut self, value: E) -> E {
        mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_value(self) -> E {
        self.value
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Some child, preferring the left one. For a node with at most one child this is
    /// the child that takes its place when it is spliced out.
    #[inline]
    pub(crate) fn only_child(&self) -> Link {
        self.left.or(self.right)
    }

    pub(crate) fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    #[inline]
    pub(crate) fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn balance(&self) -> B {
        self.balance
    }

    #[inline]
    pub(crate) fn set_balance(&mut self, balance: B) {
        self.balance = balance;
    }
}
