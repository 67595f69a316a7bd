// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core segment tree: build, point update, lazy range update, range query.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use log::{debug, trace};

use crate::error::Error;
use crate::policy::{Max, Min, Policy, Sum};
use crate::types::Scalar;

/// Lazy-propagation segment tree over a fixed sequence, parameterized by a [`Policy`].
///
/// Nodes live in two flat arrays of `4 * len` slots using heap numbering: the root
/// is slot `1` and node `i` has children `2i` and `2i + 1`. A node's range is never
/// stored; it is derived from the recursion path starting at `(1, 0, len - 1)`.
///
/// The second array holds pending deltas. A non-zero delta at a node means the
/// node's own value already reflects it but its children do not yet. Every
/// operation resolves a node's delta before reading it or descending past it.
///
/// A tree must be [built](Self::build) before it can be updated, queried, or
/// rendered; earlier calls return [`Error::NotBuilt`].
pub struct SegmentTree<T: Scalar, P: Policy<T>> {
    policy: P,
    source: Vec<T>,
    nodes: Vec<T>,
    pending: Vec<T>,
    built: bool,
}

/// Segment tree answering range sums.
pub type SumTree<T> = SegmentTree<T, Sum>;

/// Segment tree answering range minimums.
pub type MinTree<T> = SegmentTree<T, Min>;

/// Segment tree answering range maximums.
pub type MaxTree<T> = SegmentTree<T, Max>;

impl<T: Scalar, P: Policy<T>> Debug for SegmentTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let pending = self.pending.iter().filter(|d| **d != T::ZERO).count();
        f.debug_struct("SegmentTree")
            .field("policy", &self.policy)
            .field("len", &self.source.len())
            .field("slots", &self.nodes.len())
            .field("pending", &pending)
            .field("built", &self.built)
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P: Policy<T>> SegmentTree<T, P> {
    /// Create an unbuilt tree over a copy of `values`.
    ///
    /// Returns [`Error::EmptyInput`] if `values` is empty.
    pub fn new(policy: P, values: &[T]) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        let slots = 4 * values.len();
        let identity = policy.identity();
        Ok(Self {
            policy,
            source: values.to_vec(),
            nodes: vec![identity; slots],
            pending: vec![T::ZERO; slots],
            built: false,
        })
    }

    /// Create and [build](Self::build) a tree in one step.
    pub fn build_from(policy: P, values: &[T]) -> Result<Self, Error> {
        let mut tree = Self::new(policy, values)?;
        tree.build();
        Ok(tree)
    }

    /// Populate every node from the construction input.
    ///
    /// Calling this again resets the tree to the construction input, discarding
    /// all updates and pending deltas.
    pub fn build(&mut self) {
        self.pending.fill(T::ZERO);
        let hi = self.last();
        self.build_node(1, 0, hi);
        self.built = true;
        debug!(
            "built {:?} segment tree over {} elements ({} slots)",
            self.policy,
            self.len(),
            self.nodes.len()
        );
    }

    /// Overwrite the element at `index` with `value`.
    pub fn point_update(&mut self, index: usize, value: T) -> Result<(), Error> {
        self.ensure_built()?;
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        trace!("point_update [{index}] = {value}");
        let hi = self.last();
        self.update_point(1, 0, hi, index, value);
        Ok(())
    }

    /// Add `delta` to every element in the inclusive range `[lo, hi]`.
    pub fn range_update(&mut self, lo: usize, hi: usize, delta: T) -> Result<(), Error> {
        self.ensure_built()?;
        self.check_range(lo, hi)?;
        trace!("range_update [{lo}, {hi}] += {delta}");
        let last = self.last();
        self.update_range(1, 0, last, lo, hi, delta);
        Ok(())
    }

    /// Aggregate of the elements in the inclusive range `[lo, hi]`.
    ///
    /// Takes `&mut self` because pending deltas on the visited path are resolved.
    pub fn range_query(&mut self, lo: usize, hi: usize) -> Result<T, Error> {
        self.ensure_built()?;
        self.check_range(lo, hi)?;
        let last = self.last();
        let out = self.query(1, 0, last, lo, hi);
        trace!("range_query [{lo}, {hi}] -> {out}");
        Ok(out)
    }

    /// Current value of the element at `index`.
    pub fn get(&mut self, index: usize) -> Result<T, Error> {
        self.ensure_built()?;
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        self.range_query(index, index)
    }

    /// Aggregate of the whole sequence.
    pub fn total(&mut self) -> Result<T, Error> {
        self.ensure_built()?;
        self.push(1, 0, self.last());
        Ok(self.nodes[1])
    }

    /// Current values of all elements, resolving every pending delta.
    pub fn values(&mut self) -> Result<Vec<T>, Error> {
        self.ensure_built()?;
        let mut out = Vec::with_capacity(self.len());
        let last = self.last();
        self.collect_leaves(1, 0, last, &mut out);
        Ok(out)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Whether [`build`](Self::build) has been called.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// The aggregation policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Number of allocated node slots (`4 * len`).
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Stored value of a node, without resolving its pending delta.
    pub(crate) fn stored(&self, node: usize) -> T {
        self.nodes[node]
    }

    /// Whether a node carries an unresolved delta.
    pub(crate) fn has_pending(&self, node: usize) -> bool {
        self.pending[node] != T::ZERO
    }

    pub(crate) fn ensure_built(&self) -> Result<(), Error> {
        if self.built {
            Ok(())
        } else {
            Err(Error::NotBuilt)
        }
    }

    fn last(&self) -> usize {
        self.source.len() - 1
    }

    fn check_range(&self, lo: usize, hi: usize) -> Result<(), Error> {
        if lo > hi || hi >= self.len() {
            return Err(Error::InvalidRange {
                lo,
                hi,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn build_node(&mut self, node: usize, l: usize, r: usize) {
        if l == r {
            self.nodes[node] = self.source[l];
            return;
        }
        let mid = l + (r - l) / 2;
        self.build_node(2 * node, l, mid);
        self.build_node(2 * node + 1, mid + 1, r);
        self.nodes[node] = self
            .policy
            .combine(self.nodes[2 * node], self.nodes[2 * node + 1]);
    }

    /// Fold the node's pending delta into its value and hand it to the children.
    fn push(&mut self, node: usize, l: usize, r: usize) {
        let delta = self.pending[node];
        if delta == T::ZERO {
            return;
        }
        self.nodes[node] = self.policy.apply(self.nodes[node], delta, r - l + 1);
        if l != r {
            for child in [2 * node, 2 * node + 1] {
                self.pending[child] = T::add(self.pending[child], delta);
            }
        }
        self.pending[node] = T::ZERO;
    }

    /// Recompute an internal node from its (resolved) children.
    fn pull(&mut self, node: usize, l: usize, r: usize) {
        let mid = l + (r - l) / 2;
        // The sibling not visited by a point update may still hold a delta.
        self.push(2 * node, l, mid);
        self.push(2 * node + 1, mid + 1, r);
        self.nodes[node] = self
            .policy
            .combine(self.nodes[2 * node], self.nodes[2 * node + 1]);
    }

    fn update_point(&mut self, node: usize, l: usize, r: usize, index: usize, value: T) {
        self.push(node, l, r);
        if l == r {
            self.nodes[node] = value;
            return;
        }
        let mid = l + (r - l) / 2;
        if index <= mid {
            self.update_point(2 * node, l, mid, index, value);
        } else {
            self.update_point(2 * node + 1, mid + 1, r, index, value);
        }
        self.pull(node, l, r);
    }

    fn update_range(&mut self, node: usize, l: usize, r: usize, lo: usize, hi: usize, delta: T) {
        self.push(node, l, r);
        if hi < l || lo > r {
            return;
        }
        if lo <= l && r <= hi {
            self.pending[node] = T::add(self.pending[node], delta);
            self.push(node, l, r);
            return;
        }
        let mid = l + (r - l) / 2;
        self.update_range(2 * node, l, mid, lo, hi, delta);
        self.update_range(2 * node + 1, mid + 1, r, lo, hi, delta);
        self.pull(node, l, r);
    }

    fn query(&mut self, node: usize, l: usize, r: usize, lo: usize, hi: usize) -> T {
        self.push(node, l, r);
        if hi < l || lo > r {
            return self.policy.identity();
        }
        if lo <= l && r <= hi {
            return self.nodes[node];
        }
        let mid = l + (r - l) / 2;
        let left = self.query(2 * node, l, mid, lo, hi);
        let right = self.query(2 * node + 1, mid + 1, r, lo, hi);
        self.policy.combine(left, right)
    }

    fn collect_leaves(&mut self, node: usize, l: usize, r: usize, out: &mut Vec<T>) {
        self.push(node, l, r);
        if l == r {
            out.push(self.nodes[node]);
            return;
        }
        let mid = l + (r - l) / 2;
        self.collect_leaves(2 * node, l, mid, out);
        self.collect_leaves(2 * node + 1, mid + 1, r, out);
    }
}
