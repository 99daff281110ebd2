//! An ordered set backed by a B-tree with a runtime-configurable order.
//!
//! This crate provides [`BSet`], a duplicate-free sorted collection whose branching factor
//! (the B-tree *order*, i.e. the maximum number of children per node) is chosen when the set
//! is created, and whose elements are compared through a caller-supplied [`Less`] predicate
//! rather than a fixed `Ord` implementation.
//!
//! - [`contains`](BSet::contains) / [`get`](BSet::get) - Membership tests
//! - [`insert`](BSet::insert) / [`try_insert`](BSet::try_insert) - Insertion; equivalent elements are not re-inserted
//! - [`for_each`](BSet::for_each) - Visit every element once, in ascending order
//!
//! # Example
//!
//! ```
//! use bset::BSet;
//!
//! // Order 3: at most two keys per node.
//! let mut set = BSet::new(3).unwrap();
//! set.insert(10);
//! set.insert(20);
//! set.insert(5);
//!
//! assert!(set.contains(&10));
//! assert!(!set.contains(&99));
//! assert_eq!(set.height(), 2);
//!
//! let mut seen = Vec::new();
//! set.for_each(|x| seen.push(*x));
//! assert_eq!(seen, [5, 10, 20]);
//! ```
//!
//! A closure can stand in for the ordering:
//!
//! ```
//! use bset::BSet;
//!
//! // Case-insensitive set of names.
//! let mut names = BSet::with_less(4, |a: &String, b: &String| {
//!     a.to_lowercase() < b.to_lowercase()
//! })
//! .unwrap();
//! assert!(names.insert(String::from("Alice")));
//! assert!(!names.insert(String::from("ALICE")));
//! assert_eq!(names.get(&String::from("alice")).map(String::as_str), Some("Alice"));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Fallible insertion** - [`try_insert`](BSet::try_insert) reports allocation failure and leaves the set untouched
//! - **Arena storage** - Nodes live in one contiguous arena and refer to each other by handle
//!
//! # Implementation
//!
//! Classic B-tree (keys stored in internal nodes as well as leaves). Overflowing nodes split
//! around a left-biased pivot that is promoted into the parent, growing the tree at the root.
//! Deletion, range queries and cursors are intentionally not provided.

#![no_std]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod less;
mod raw;

pub mod bset;

pub use bset::BSet;
pub use error::{Error, Result};
pub use less::{Less, Natural};
