// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_segtree --heading-base-level=0

//! Understory Segment Tree: a lazy-propagation range-aggregation index.
//!
//! Understory Segment Tree answers aggregate queries over contiguous ranges of a fixed
//! integer sequence.
//!
//! - Build once over a sequence, then issue point updates, additive range updates, and
//!   range queries in `O(log n)` each.
//! - Choose the aggregation with a [`Policy`]: [`Sum`], [`Min`], [`Max`], or the
//!   runtime-selectable [`Aggregation`].
//! - Render the tree's internal state as ASCII art with [`SegmentTree::render`].
//!
//! The tree is a flat array with implicit heap numbering (root `1`, children `2i` and
//! `2i + 1`). Node ranges are never stored; they follow from the recursion path.
//! Range updates are deferred with pending deltas that are pushed down when a node
//! is next visited.
//!
//! # Example
//!
//! ```rust
//! use understory_segtree::{Sum, SumTree};
//!
//! let mut tree = SumTree::build_from(Sum, &[1_i64, 3, 5, 7, 9, 11]).unwrap();
//! assert_eq!(tree.range_query(1, 4), Ok(24));
//!
//! // Add 5 to elements 1..=3.
//! tree.range_update(1, 3, 5).unwrap();
//! assert_eq!(tree.range_query(1, 4), Ok(39));
//!
//! tree.point_update(2, 15).unwrap();
//! assert_eq!(tree.range_query(1, 4), Ok(44));
//! ```
//!
//! Picking the aggregation at runtime and rendering:
//!
//! ```rust
//! use understory_segtree::{Aggregation, SegmentTree};
//!
//! let tree = SegmentTree::build_from(Aggregation::Max, &[4_i32, 9, 2]).unwrap();
//! for line in tree.render().unwrap() {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Choosing a policy
//!
//! - `Sum`: a range update of `d` over `len` elements adds `d * len` to the aggregate.
//! - `Min`/`Max`: a range update of `d` shifts the aggregate by exactly `d`.
//!
//! All arithmetic saturates at the scalar's bounds. `Min` and `Max` use `MAX` and
//! `MIN` as their identities.
//!
//! ## Errors
//!
//! Operations validate their arguments and return [`Error`] instead of panicking:
//! empty input, out-of-bounds indices or ranges, and use before [`SegmentTree::build`].
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics go through the `log` facade.

#![no_std]

extern crate alloc;

pub mod error;
pub mod policy;
pub mod render;
pub mod tree;
pub mod types;

pub use error::Error;
pub use policy::{Aggregation, Max, Min, Policy, Sum};
pub use render::{RenderConfig, RenderFlags};
pub use tree::{MaxTree, MinTree, SegmentTree, SumTree};
pub use types::Scalar;
