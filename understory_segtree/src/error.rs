// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported at the segment tree boundary.

use core::fmt;

/// Precondition failure reported by a [`SegmentTree`](crate::SegmentTree) operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The tree was constructed over zero elements.
    EmptyInput,
    /// A point index is outside `0..len`.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of elements in the tree.
        len: usize,
    },
    /// A range has `lo > hi` or reaches past the last element.
    InvalidRange {
        /// Inclusive lower bound.
        lo: usize,
        /// Inclusive upper bound.
        hi: usize,
        /// Number of elements in the tree.
        len: usize,
    },
    /// An update, query, or render was issued before [`build`](crate::SegmentTree::build).
    NotBuilt,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "segment tree needs at least one element"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for {len} elements")
            }
            Self::InvalidRange { lo, hi, len } => {
                write!(f, "range [{lo}, {hi}] is invalid for {len} elements")
            }
            Self::NotBuilt => write!(f, "segment tree has not been built"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_bounds() {
        let e = Error::InvalidRange { lo: 4, hi: 2, len: 6 };
        assert_eq!(e.to_string(), "range [4, 2] is invalid for 6 elements");
        let e = Error::IndexOutOfBounds { index: 9, len: 3 };
        assert_eq!(e.to_string(), "index 9 out of bounds for 3 elements");
    }
}
