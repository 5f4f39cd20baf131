//! Self-balancing ordered sets for Rust.
//!
//! This crate provides two binary search trees that keep themselves balanced, behind
//! one contract, [`BalancedOrderedSet`]:
//!
//! - [`AvlTree`] - height balance: sibling subtree heights never differ by more than one
//! - [`RedBlackTree`] - color balance: every root-to-leaf path carries the same number of
//!   black nodes and no red node has a red child
//! - [`OrderedSet`] - picks either strategy at runtime through [`Strategy`]
//!
//! Every set stores unique elements in ascending order, either by the element's [`Ord`]
//! or by an injected [`Comparator`]. Insertion, removal and lookup are O(log n) in the
//! worst case; `size()` is O(1).
//!
//! # Example
//!
//! ```
//! use balanced_set::{BalancedOrderedSet, OrderedSet, SetError, Strategy};
//!
//! let mut set: OrderedSet<i32> = OrderedSet::new(Strategy::RedBlack);
//! for value in [50, 25, 75, 100, 60, 55, 70, 65, 71, 73] {
//!     set.add(value)?;
//! }
//!
//! assert_eq!(set.size(), 10);
//! assert_eq!(set.first(), Ok(&25));
//! assert_eq!(set.contains(&71), Ok(true));
//!
//! // Absent arguments and empty sets are reported, not panicked on.
//! assert_eq!(set.contains(None::<&i32>), Err(SetError::InvalidArgument { operation: "contains" }));
//!
//! // The invariant checker walks the whole tree and reports the first fault.
//! set.check_balanced()?;
//! # Ok::<(), SetError>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Arena storage** - Nodes live in one contiguous slab and link to each other by index
//! - **Invariant checker** - [`check_balanced`](BalancedOrderedSet::check_balanced) reports
//!   which rule broke, the two conflicting measurements, and the offending subtree
//!
//! # Logging
//!
//! Rotations and rebalancing cases are emitted as [`tracing`] events at `TRACE` level;
//! checker failures at `DEBUG`. The crate never installs a subscriber.

#![cfg_attr(not(test), no_std)]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod avl;
mod check;
mod error;
mod order;
mod ordered_set;
mod raw;
mod red_black;
mod set;

pub use avl::AvlTree;
pub use error::{SetError, Violation};
pub use order::Comparator;
pub use ordered_set::{Builder, OrderedSet};
pub use red_black::RedBlackTree;
pub use set::{BalancedOrderedSet, Strategy};
