//! An AVL order-statistic index for Rust.
//!
//! This crate provides [`OrderedIndex`], an ordered set of unique keys kept height-balanced as an
//! AVL tree. Every node caches its height and the size of its subtree, which gives O(log n):
//!
//! - [`insert`](OrderedIndex::insert) - Add a key; duplicates are ignored
//! - [`find`](OrderedIndex::find) - Look a key up and inspect its node through a [`NodeRef`]
//! - [`range_count`](OrderedIndex::range_count) - Count the keys in a closed interval `[low, high]`
//!
//! # Example
//!
//! ```
//! use avl_index::OrderedIndex;
//!
//! let mut index = OrderedIndex::new();
//! for key in ["d", "b", "f", "a", "c", "e", "g"] {
//!     index.insert(key.to_owned());
//! }
//!
//! // Membership (O(log n))
//! assert!(index.find("c").is_some());
//! assert!(index.find("x").is_none());
//!
//! // Duplicates are silently dropped
//! assert!(!index.insert("c".to_owned()));
//! assert_eq!(index.len(), 7);
//!
//! // Closed-interval range counting (O(log n))
//! assert_eq!(index.range_count("b", "f"), 5);
//! assert_eq!(index.range_count("f", "b"), 0);
//!
//! // The tree stays balanced
//! assert_eq!(index.height(), Some(2));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) range counting** - Intervals are answered by rank decomposition over cached
//!   subtree sizes, never by visiting the keys inside the interval
//! - **Arena storage** - Nodes live in one contiguous arena and are linked by 32-bit handles
//!
//! # Implementation
//!
//! The index is an AVL tree whose nodes also keep a parent link. Insertion descends
//! recursively and, on the way back up, recomputes each node's height and subtree size and
//! restores balance with single or double rotations. Range counting splits the interval at the
//! highest node inside it and then counts each side with one root-to-leaf descent.

#![no_std]
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

mod error;
mod raw;

pub mod ordered_index;

pub use error::InvariantViolation;
pub use ordered_index::{NodeRef, OrderedIndex};
