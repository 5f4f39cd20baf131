use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// Failures reported by the ordered-set contract and by the invariant checker.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SetError {
    /// A required element was absent (`None`).
    #[error("`{operation}()` requires an element, got none")]
    InvalidArgument { operation: &'static str },

    /// `first()` or `last()` was called on an empty set.
    #[error("`{operation}()` called on an empty set")]
    EmptyCollection { operation: &'static str },

    /// The invariant checker found a structural fault.
    ///
    /// `left` and `right` are the two conflicting measurements taken at the
    /// offending node: subtree heights, black heights, or (for
    /// [`Violation::OutOfOrder`]) the in-order positions of the two elements.
    /// `dump` is the offending subtree as `N{d=value, b=balance, l=.., r=..}`.
    #[error("{violation} (left={left}, right={right}) at {dump}")]
    UnbalancedStructure {
        violation: Violation,
        left: usize,
        right: usize,
        dump: String,
    },
}

/// Which invariant an [`SetError::UnbalancedStructure`] reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Violation {
    /// Sibling subtree heights differ by more than one.
    HeightDifference,
    /// A node's cached height is not one more than its taller child's.
    StaleHeight,
    /// A non-empty red-black tree has a red root.
    RedRoot,
    /// A red node has a red child.
    RedChild,
    /// Two sibling subtrees have different black heights.
    BlackHeight,
    /// An in-order walk is not strictly ascending under the active ordering.
    OutOfOrder,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HeightDifference => "child subtree heights differ by more than one",
            Self::StaleHeight => "cached subtree height is stale",
            Self::RedRoot => "root must be black",
            Self::RedChild => "red node has a red child",
            Self::BlackHeight => "child subtrees have different black heights",
            Self::OutOfOrder => "elements are not in strictly ascending order",
        })
    }
}
