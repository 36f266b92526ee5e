//! An arena-backed ordered set for Rust.
//!
//! This crate provides [`OrderedSet`], a collection of distinct values kept in strictly ascending
//! order, with membership test, insertion, deletion and the usual set algebra:
//!
//! - [`union`](OrderedSet::union) / `&a | &b`
//! - [`intersection`](OrderedSet::intersection) / `&a & &b`
//! - [`difference`](OrderedSet::difference) / `&a - &b`
//! - [`symmetric_difference`](OrderedSet::symmetric_difference) / `&a ^ &b`
//! - [`is_subset`](OrderedSet::is_subset)
//!
//! Every operation reports its outcome through its return value; nothing here returns an error.
//!
//! # Example
//!
//! ```
//! use ordset::OrderedSet;
//!
//! let mut a = OrderedSet::new();
//! assert!(a.insert(3.14));
//! assert!(a.insert(1.41));
//! assert!(!a.insert(3.14)); // already present
//!
//! let b = OrderedSet::from([2.71, 3.14]);
//!
//! let union = &a | &b;
//! assert_eq!(union.labeled("C").to_string(), "C = { 1.41, 2.71, 3.14 }");
//! assert!(OrderedSet::from([3.14]).is_subset(&a));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Familiar API** - Method names mirror `std::collections::BTreeSet`
//! - **Floats welcome** - Elements need only `PartialOrd`; `NaN` is refused on insert
//!
//! # Implementation
//!
//! Elements are stored in an arena of slots and ordered by an ascending vector of handles into
//! that arena. Lookups are a binary search over the handles, set algebra is a linear merge of two
//! ascending sequences, and removed slots are recycled by later insertions.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod raw;

pub mod ordered_set;

pub use ordered_set::OrderedSet;
