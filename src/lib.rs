//! A red-black tree ordered map for Rust.
//!
//! This crate provides [`RBTreeMap`], a sorted key-value map with O(log n) insert, lookup and
//! removal, plus ordered traversal bounded either by a key interval or by a result count:
//!
//! - [`range`](RBTreeMap::range) / [`range_desc`](RBTreeMap::range_desc) - Entries inside a
//!   closed key interval, ascending or descending
//! - [`range_n`](RBTreeMap::range_n) - Up to `n` entries ascending from the smallest key `>=` a
//!   starting key
//! - [`range_desc_n`](RBTreeMap::range_desc_n) - Up to `n` entries descending from the largest
//!   key `<=` a starting key
//! - [`pop_first`](RBTreeMap::pop_first) / [`pop_last`](RBTreeMap::pop_last) - Extract the
//!   extremal entries
//!
//! # Example
//!
//! ```
//! use rbtree_map::RBTreeMap;
//!
//! let mut offsets = RBTreeMap::new();
//! for key in [10, 20, 30, 40, 50] {
//!     offsets.insert(key, key * 2);
//! }
//!
//! // Closed interval, both bounds inclusive.
//! assert_eq!(offsets.range(&20, &40), [(&20, &40), (&30, &60), (&40, &80)]);
//!
//! // 15 is not stored; seeking starts at its ceiling, 20.
//! assert_eq!(offsets.range_n(2, &15), [(&20, &40), (&30, &60)]);
//!
//! // 45 is not stored; seeking starts at its floor, 40.
//! assert_eq!(offsets.range_desc_n(2, &45), [(&40, &80), (&30, &60)]);
//!
//! assert_eq!(offsets.pop_first(), Some((10, 20)));
//! assert_eq!(offsets.first_key_value(), Some((&20, &40)));
//! assert_eq!(offsets.get(&99), None);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Injected ordering** - Keys are compared through a [`Comparator`], either the key's own
//!   [`Ord`] ([`NaturalOrder`]) or any `Fn(&K, &K) -> Ordering` closure
//! - **Materialized results** - Range and traversal operations return a `Vec`, so no cursor
//!   can be invalidated by later mutation
//! - **Logging** - Rotations and bulk structural events are reported through the [`log`] facade
//!
//! # Implementation
//!
//! The map is a red-black tree whose nodes live in an arena and link to each other by index,
//! with parent back-links for O(1) amortized successor and predecessor steps. All fixups are
//! iterative. Single-threaded: callers sharing a map across threads must serialize access
//! themselves.

#![no_std]
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

mod comparator;
mod raw;

pub mod rbtree_map;

pub use comparator::{Comparator, NaturalOrder};
pub use rbtree_map::RBTreeMap;
