// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction for the values stored in a segment tree.

use core::fmt::{Debug, Display};

/// Integer scalar stored at every node of a [`SegmentTree`](crate::SegmentTree).
///
/// This trait provides the minimal arithmetic the engine and the built-in
/// policies need. All arithmetic saturates at the type's bounds, so adding a
/// delta to a saturated `MIN`/`MAX` value leaves it saturated.
pub trait Scalar: Copy + Ord + Debug + Display {
    /// Additive identity, also the neutral pending delta.
    const ZERO: Self;

    /// Smallest representable value.
    const MIN: Self;

    /// Largest representable value.
    const MAX: Self;

    /// Saturating addition.
    fn add(a: Self, b: Self) -> Self;

    /// Saturating multiplication by a range length.
    fn mul_len(v: Self, len: usize) -> Self;
}

impl Scalar for i32 {
    const ZERO: Self = 0;
    const MIN: Self = Self::MIN;
    const MAX: Self = Self::MAX;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn mul_len(v: Self, len: usize) -> Self {
        match Self::try_from(len) {
            Ok(len) => v.saturating_mul(len),
            Err(_) if v == 0 => 0,
            Err(_) if v > 0 => Self::MAX,
            Err(_) => Self::MIN,
        }
    }
}

impl Scalar for i64 {
    const ZERO: Self = 0;
    const MIN: Self = Self::MIN;
    const MAX: Self = Self::MAX;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn mul_len(v: Self, len: usize) -> Self {
        match Self::try_from(len) {
            Ok(len) => v.saturating_mul(len),
            Err(_) if v == 0 => 0,
            Err(_) if v > 0 => Self::MAX,
            Err(_) => Self::MIN,
        }
    }
}

/// True if `v` is one of the scalar's bounds (`MIN` or `MAX`).
///
/// These are the values the min/max policies use as "no contribution".
#[inline]
pub fn is_bound<T: Scalar>(v: T) -> bool {
    v == T::MIN || v == T::MAX
}
