//! Read-only verification of tree invariants.
//!
//! Every pass is a post-order walk that reports the first fault it meets as
//! [`SetError::UnbalancedStructure`]. Nothing here runs during normal operation.

use alloc::string::ToString;
use core::cmp::Ordering;
use core::fmt;

use tracing::debug;

use crate::error::{SetError, Violation};
use crate::raw::{Handle, Link, RawTree};
use crate::red_black::Color;

/// Verifies that an in-order walk is strictly ascending under the tree's ordering.
pub(crate) fn check_order<E, B>(tree: &RawTree<E, B>) -> Result<(), SetError>
where
    E: fmt::Debug,
    B: Copy + fmt::Display,
{
    let mut previous: Option<(usize, &E)> = None;
    let mut position = 0;
    let mut fault = None;
    tree.walk_in_order(|handle, value| {
        if fault.is_none()
            && let Some((before, earlier)) = previous
            && tree.compare(earlier, value) != Ordering::Less
        {
            fault = Some((handle, before, position));
        }
        previous = Some((position, value));
        position += 1;
    });

    match fault {
        Some((handle, before, after)) => Err(violation(tree, handle, Violation::OutOfOrder, before, after)),
        None => Ok(()),
    }
}

/// Height-balance mode: ordering, `|height(left) - height(right)| <= 1` everywhere,
/// and every cached height accurate.
pub(crate) fn check_heights<E>(tree: &RawTree<E, u8>) -> Result<(), SetError>
where
    E: fmt::Debug,
{
    check_order(tree)?;
    subtree_height(tree, tree.root()).map(drop)
}

fn subtree_height<E>(tree: &RawTree<E, u8>, link: Link) -> Result<usize, SetError>
where
    E: fmt::Debug,
{
    let Some(handle) = link else {
        return Ok(0);
    };
    let node = tree.node(handle);
    let left = subtree_height(tree, node.left())?;
    let right = subtree_height(tree, node.right())?;
    if left.abs_diff(right) > 1 {
        return Err(violation(tree, handle, Violation::HeightDifference, left, right));
    }

    let height = 1 + left.max(right);
    let cached = usize::from(node.balance());
    if cached != height {
        return Err(violation(tree, handle, Violation::StaleHeight, cached, height));
    }
    Ok(height)
}

/// Color-balance mode: ordering, black root, no red node with a red child, and equal
/// black heights on both sides of every node.
pub(crate) fn check_colors<E>(tree: &RawTree<E, Color>) -> Result<(), SetError>
where
    E: fmt::Debug,
{
    check_order(tree)?;
    let Some(root) = tree.root() else {
        return Ok(());
    };
    if tree.node(root).balance() == Color::Red {
        return Err(violation(tree, root, Violation::RedRoot, 0, 0));
    }
    black_height(tree, Some(root)).map(drop)
}

fn color_of<E>(tree: &RawTree<E, Color>, link: Link) -> Color {
    link.map_or(Color::Black, |handle| tree.node(handle).balance())
}

/// Black nodes on every path from below `link` down to an absent child.
fn black_height<E>(tree: &RawTree<E, Color>, link: Link) -> Result<usize, SetError>
where
    E: fmt::Debug,
{
    let Some(handle) = link else {
        return Ok(0);
    };
    let node = tree.node(handle);
    let left = black_height(tree, node.left())?;
    let right = black_height(tree, node.right())?;
    if left != right {
        return Err(violation(tree, handle, Violation::BlackHeight, left, right));
    }

    match node.balance() {
        Color::Red => {
            if color_of(tree, node.left()) == Color::Red || color_of(tree, node.right()) == Color::Red {
                return Err(violation(tree, handle, Violation::RedChild, left, right));
            }
            Ok(left)
        }
        Color::Black => Ok(left + 1),
    }
}

fn violation<E, B>(tree: &RawTree<E, B>, at: Handle, violation: Violation, left: usize, right: usize) -> SetError
where
    E: fmt::Debug,
    B: Copy + fmt::Display,
{
    debug!(%violation, left, right, node = ?at, "balance check failed");
    SetError::UnbalancedStructure {
        violation,
        left,
        right,
        dump: tree.dump(Some(at)).to_string(),
    }
}
