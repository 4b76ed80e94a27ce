//! An augmented AVL interval tree indexing closed intervals `[low, high]`,
//! each with an optional shared payload.
//!
//! The [`IntervalTree`] answers point containment ("which intervals contain
//! `v`?") and overlap ("which intervals share a point with `[low, high]`?")
//! queries, pruning subtrees using the maximum upper bound cached in every
//! node.
//!
//! ```
//! use aitree::{Interval, IntervalTree};
//! use std::sync::Arc;
//!
//! let mut t = IntervalTree::new();
//! t.insert(1, 3, Some(Arc::new("a"))).unwrap();
//! t.insert(5, 8, Some(Arc::new("b"))).unwrap();
//! t.insert(2, 6, None).unwrap();
//! t.insert(15, 20, None).unwrap();
//!
//! assert_eq!(t.containing(&6).len(), 2);
//! assert!(!t.overlaps(&9, &14));
//! assert_eq!(t.max_high_overlapping(&0, &100), Some(&20));
//! assert_eq!(t.to_string(), "[1, 3] [2, 6] [5, 8] [15, 20] ");
//!
//! t.remove(&Interval::new(5, 8));
//! assert_eq!(t.len(), 3);
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

mod error;
mod interval;
mod iter;
mod node;
mod tree;

pub use error::*;
pub use interval::*;
pub use iter::IntoIter;
pub use tree::*;

#[cfg(test)]
mod test_utils;
