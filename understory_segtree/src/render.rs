// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ASCII layout of a segment tree's internal state.
//!
//! The root is written at `(row 0, root_col)`. Each level below sits two rows
//! lower, with children shifted left and right by the current horizontal
//! offset, which halves at every level. Branch markers (`/` and `\`) go on the
//! row in between, halfway towards each child.
//!
//! Stored node values are shown as they are, so children under a node with an
//! unresolved delta show their stale values (see [`RenderFlags::PENDING_MARKERS`]).
//!
//! The grid has a fixed size. Anything that falls outside it is dropped
//! silently; a warning is logged when that happens.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use log::warn;

use crate::error::Error;
use crate::policy::Policy;
use crate::tree::SegmentTree;
use crate::types::{Scalar, is_bound};

bitflags::bitflags! {
    /// Options controlling what the renderer draws.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Draw `/` and `\` markers between a node and its children.
        const BRANCHES        = 0b0000_0001;
        /// Append `*` to nodes whose pending delta has not reached their children.
        const PENDING_MARKERS = 0b0000_0010;
        /// Skip subtrees whose value is the scalar's `MIN` or `MAX`.
        ///
        /// This treats a sentinel value as "no node here", which also hides real
        /// nodes that happen to hold that value.
        const HIDE_SENTINELS  = 0b0000_0100;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self::BRANCHES
    }
}

/// Grid geometry and options for [`SegmentTree::render_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Grid height in rows. Levels below it are truncated.
    pub rows: usize,
    /// Grid width in columns. Characters past it are clipped.
    pub cols: usize,
    /// Column of the root's first character.
    pub root_col: usize,
    /// Horizontal distance from the root to each child; halves per level.
    pub root_offset: usize,
    /// Drawing options.
    pub flags: RenderFlags,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 120,
            root_col: 60,
            root_offset: 30,
            flags: RenderFlags::default(),
        }
    }
}

struct Canvas {
    grid: Vec<Vec<char>>,
    truncated: bool,
}

impl Canvas {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: vec![vec![' '; cols]; rows],
            truncated: false,
        }
    }

    fn put(&mut self, row: usize, col: isize, ch: char) {
        let cell = match usize::try_from(col) {
            Ok(col) => self.grid.get_mut(row).and_then(|cells| cells.get_mut(col)),
            Err(_) => None,
        };
        match cell {
            Some(cell) => *cell = ch,
            None => self.truncated = true,
        }
    }

    fn put_str(&mut self, row: usize, col: isize, text: &str) {
        let mut col = col;
        for ch in text.chars() {
            self.put(row, col, ch);
            col = col.saturating_add(1);
        }
    }

    fn into_lines(self) -> (Vec<String>, bool) {
        let lines = self
            .grid
            .into_iter()
            .filter(|row| row.iter().any(|c| *c != ' '))
            .map(|row| {
                let line: String = row.into_iter().collect();
                line.trim_end().to_string()
            })
            .collect();
        (lines, self.truncated)
    }
}

struct Layout<'a, T: Scalar, P: Policy<T>> {
    tree: &'a SegmentTree<T, P>,
    flags: RenderFlags,
    canvas: Canvas,
}

impl<T: Scalar, P: Policy<T>> Layout<'_, T, P> {
    fn place(&mut self, node: usize, l: usize, r: usize, col: isize, row: usize, offset: usize) {
        if node >= self.tree.slots() || l > r {
            return;
        }
        if row >= self.canvas.grid.len() {
            self.canvas.truncated = true;
            return;
        }
        let value = self.tree.stored(node);
        if self.flags.contains(RenderFlags::HIDE_SENTINELS) && is_bound(value) {
            return;
        }

        let mut text = value.to_string();
        if self.flags.contains(RenderFlags::PENDING_MARKERS) && self.tree.has_pending(node) {
            text.push('*');
        }
        self.canvas.put_str(row, col, &text);

        if l == r {
            return;
        }
        let mid = l + (r - l) / 2;
        let half = to_isize(offset / 2);
        let step = to_isize(offset);
        if self.flags.contains(RenderFlags::BRANCHES) {
            self.canvas.put(row + 1, col.saturating_sub(half), '/');
        }
        self.place(2 * node, l, mid, col.saturating_sub(step), row + 2, offset / 2);
        if self.flags.contains(RenderFlags::BRANCHES) {
            self.canvas.put(row + 1, col.saturating_add(half), '\\');
        }
        self.place(
            2 * node + 1,
            mid + 1,
            r,
            col.saturating_add(step),
            row + 2,
            offset / 2,
        );
    }
}

fn to_isize(v: usize) -> isize {
    isize::try_from(v).unwrap_or(isize::MAX)
}

impl<T: Scalar, P: Policy<T>> SegmentTree<T, P> {
    /// Render the tree with the default 20 × 120 layout.
    ///
    /// Returns the non-blank rows of the grid, top to bottom, with trailing
    /// blanks trimmed.
    pub fn render(&self) -> Result<Vec<String>, Error> {
        self.render_with(&RenderConfig::default())
    }

    /// Render the tree with an explicit grid geometry and options.
    ///
    /// Does not resolve pending deltas; the tree is left unchanged.
    pub fn render_with(&self, config: &RenderConfig) -> Result<Vec<String>, Error> {
        self.ensure_built()?;
        let mut layout = Layout {
            tree: self,
            flags: config.flags,
            canvas: Canvas::new(config.rows, config.cols),
        };
        layout.place(
            1,
            0,
            self.len() - 1,
            to_isize(config.root_col),
            0,
            config.root_offset,
        );
        let (lines, truncated) = layout.canvas.into_lines();
        if truncated {
            warn!(
                "segment tree render truncated to a {}x{} grid",
                config.rows, config.cols
            );
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Min, Sum};
    use alloc::string::String;
    use alloc::vec;
    use crate::tree::{MinTree, SumTree};

    /// Build a line with `text` placed at each given column.
    fn line(parts: &[(usize, &str)]) -> String {
        let mut out = String::new();
        for (col, text) in parts {
            while out.len() < *col {
                out.push(' ');
            }
            out.push_str(text);
        }
        out
    }

    #[test]
    fn single_element_is_one_row() {
        let t = SumTree::build_from(Sum, &[7_i64]).unwrap();
        let lines = t.render().unwrap();
        assert_eq!(lines, vec![line(&[(60, "7")])]);
    }

    #[test]
    fn three_elements_layout() {
        let t = SumTree::build_from(Sum, &[1_i64, 2, 3]).unwrap();
        let lines = t.render().unwrap();
        let expected = vec![
            line(&[(60, "6")]),
            line(&[(45, "/"), (75, "\\")]),
            line(&[(30, "3"), (90, "3")]),
            line(&[(23, "/"), (37, "\\")]),
            line(&[(15, "1"), (45, "2")]),
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn branches_can_be_disabled() {
        let t = SumTree::build_from(Sum, &[1_i64, 2]).unwrap();
        let config = RenderConfig {
            flags: RenderFlags::empty(),
            ..RenderConfig::default()
        };
        let lines = t.render_with(&config).unwrap();
        assert_eq!(lines, vec![line(&[(60, "3")]), line(&[(30, "1"), (90, "2")])]);
    }

    #[test]
    fn pending_marker_shows_stale_children() {
        let mut t = SumTree::build_from(Sum, &[1_i64, 2]).unwrap();
        t.range_update(0, 1, 10).unwrap();
        let config = RenderConfig {
            flags: RenderFlags::BRANCHES | RenderFlags::PENDING_MARKERS,
            ..RenderConfig::default()
        };
        let lines = t.render_with(&config).unwrap();
        assert_eq!(lines[0], line(&[(60, "23")]));
        assert_eq!(lines[2], line(&[(30, "1*"), (90, "2*")]));
    }

    #[test]
    fn sentinel_values_are_drawn_unless_hidden() {
        let t = MinTree::build_from(Min, &[i64::MAX, 4]).unwrap();
        let shown = t.render().unwrap();
        let max = i64::MAX.to_string();
        assert_eq!(shown[2], line(&[(30, max.as_str()), (90, "4")]));

        let config = RenderConfig {
            flags: RenderFlags::BRANCHES | RenderFlags::HIDE_SENTINELS,
            ..RenderConfig::default()
        };
        let hidden = t.render_with(&config).unwrap();
        assert_eq!(hidden[2], line(&[(90, "4")]));
    }

    #[test]
    fn deep_trees_are_truncated_to_the_grid() {
        let values: Vec<i64> = (0..2048).collect();
        let t = SumTree::build_from(Sum, &values).unwrap();
        let lines = t.render().unwrap();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 120));
    }

    #[test]
    fn narrow_grid_clips_columns() {
        let t = SumTree::build_from(Sum, &[123_456_i64]).unwrap();
        let config = RenderConfig {
            rows: 2,
            cols: 4,
            root_col: 1,
            root_offset: 2,
            flags: RenderFlags::default(),
        };
        assert_eq!(t.render_with(&config).unwrap(), vec![String::from(" 123")]);
    }

    #[test]
    fn negative_columns_are_clipped() {
        let t = SumTree::build_from(Sum, &[1_i64, 2]).unwrap();
        let config = RenderConfig {
            rows: 3,
            cols: 10,
            root_col: 0,
            root_offset: 4,
            flags: RenderFlags::default(),
        };
        let lines = t.render_with(&config).unwrap();
        assert_eq!(lines, vec![line(&[(0, "3")]), line(&[(2, "\\")]), line(&[(4, "2")])]);
    }

    #[test]
    fn render_requires_build() {
        let t = SumTree::new(Sum, &[1_i64]).unwrap();
        assert_eq!(t.render(), Err(Error::NotBuilt));
    }
}
