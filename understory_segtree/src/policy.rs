// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregation policies: identity, combine, and lazy-apply rules.
//!
//! - [`Sum`]: identity `0`, combine `a + b`, a pending delta `d` over `len`
//!   elements shifts the node by `d * len`.
//! - [`Min`]: identity `T::MAX`, combine `min(a, b)`, a pending delta shifts the
//!   node by exactly `d`.
//! - [`Max`]: identity `T::MIN`, combine `max(a, b)`, a pending delta shifts the
//!   node by exactly `d`.
//!
//! Min and max use the unscaled rule because `min(a + d, b + d) = min(a, b) + d`.
//! Scaling by the range length, as a sum does, would break that identity.
//!
//! [`Aggregation`] selects one of the three at runtime.

use core::fmt::Debug;

use crate::types::Scalar;

/// Rules a [`SegmentTree`](crate::SegmentTree) uses to combine node values.
///
/// Implementations must make `combine` associative with `identity` as its
/// neutral element, and `apply` must distribute over `combine`:
/// `apply(combine(a, b), d, la + lb) == combine(apply(a, d, la), apply(b, d, lb))`.
pub trait Policy<T: Scalar>: Debug {
    /// Value contributed by a range that does not overlap a query.
    fn identity(&self) -> T;

    /// Combine the aggregates of two adjacent ranges.
    fn combine(&self, a: T, b: T) -> T;

    /// Fold a pending additive `delta` into the aggregate of a range of `len` elements.
    fn apply(&self, value: T, delta: T, len: usize) -> T;
}

/// Sum aggregation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sum;

/// Minimum aggregation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Min;

/// Maximum aggregation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Max;

impl<T: Scalar> Policy<T> for Sum {
    #[inline]
    fn identity(&self) -> T {
        T::ZERO
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        T::add(a, b)
    }

    #[inline]
    fn apply(&self, value: T, delta: T, len: usize) -> T {
        T::add(value, T::mul_len(delta, len))
    }
}

impl<T: Scalar> Policy<T> for Min {
    #[inline]
    fn identity(&self) -> T {
        T::MAX
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        a.min(b)
    }

    #[inline]
    fn apply(&self, value: T, delta: T, _len: usize) -> T {
        T::add(value, delta)
    }
}

impl<T: Scalar> Policy<T> for Max {
    #[inline]
    fn identity(&self) -> T {
        T::MIN
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        a.max(b)
    }

    #[inline]
    fn apply(&self, value: T, delta: T, _len: usize) -> T {
        T::add(value, delta)
    }
}

/// Aggregation chosen at runtime, for callers that pick the policy from input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// See [`Sum`].
    #[default]
    Sum,
    /// See [`Min`].
    Min,
    /// See [`Max`].
    Max,
}

impl Aggregation {
    /// Short lowercase name, e.g. for prompts and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl<T: Scalar> Policy<T> for Aggregation {
    fn identity(&self) -> T {
        match self {
            Self::Sum => Policy::<T>::identity(&Sum),
            Self::Min => Policy::<T>::identity(&Min),
            Self::Max => Policy::<T>::identity(&Max),
        }
    }

    fn combine(&self, a: T, b: T) -> T {
        match self {
            Self::Sum => Sum.combine(a, b),
            Self::Min => Min.combine(a, b),
            Self::Max => Max.combine(a, b),
        }
    }

    fn apply(&self, value: T, delta: T, len: usize) -> T {
        match self {
            Self::Sum => Sum.apply(value, delta, len),
            Self::Min => Min.apply(value, delta, len),
            Self::Max => Max.apply(value, delta, len),
        }
    }
}
