// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rectangular (row, column) window value type.

use core::ops::RangeInclusive;

/// An immutable window of (row, column) indices, or an explicit empty marker.
///
/// A `Window` always satisfies `top <= bottom` and `front_column <=
/// end_column`; [`GridRange::window`] normalizes inverted bounds to
/// [`GridRange::Empty`] so downstream consumers never observe a degenerate
/// window. A new range replaces the old one atomically on every recompute;
/// nothing mutates a range after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRange {
    /// No cells should be realized (empty data, or the viewport is not
    /// measurable yet).
    Empty,
    /// A non-empty rectangular window, all bounds inclusive.
    Window {
        /// First visible row index.
        top: usize,
        /// Last visible row index.
        bottom: usize,
        /// First visible column index along the front (leading) axis.
        front_column: usize,
        /// Last visible column index.
        end_column: usize,
    },
}

impl GridRange {
    /// Creates a window, normalizing inverted bounds to [`GridRange::Empty`].
    #[must_use]
    pub const fn window(top: usize, bottom: usize, front_column: usize, end_column: usize) -> Self {
        if top > bottom || front_column > end_column {
            Self::Empty
        } else {
            Self::Window {
                top,
                bottom,
                front_column,
                end_column,
            }
        }
    }

    /// Returns `true` if no cells should be realized.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The inclusive row index range, if any.
    #[must_use]
    pub const fn rows(&self) -> Option<RangeInclusive<usize>> {
        match *self {
            Self::Empty => None,
            Self::Window { top, bottom, .. } => Some(top..=bottom),
        }
    }

    /// The inclusive column index range, if any.
    #[must_use]
    pub const fn columns(&self) -> Option<RangeInclusive<usize>> {
        match *self {
            Self::Empty => None,
            Self::Window {
                front_column,
                end_column,
                ..
            } => Some(front_column..=end_column),
        }
    }

    /// Number of rows in the window.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        match *self {
            Self::Empty => 0,
            Self::Window { top, bottom, .. } => bottom - top + 1,
        }
    }

    /// Number of columns in the window.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        match *self {
            Self::Empty => 0,
            Self::Window {
                front_column,
                end_column,
                ..
            } => end_column - front_column + 1,
        }
    }

    /// Number of (row, column) cells in the window.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Returns `true` if the given row index lies inside the window.
    #[must_use]
    pub const fn contains_row(&self, row: usize) -> bool {
        match *self {
            Self::Empty => false,
            Self::Window { top, bottom, .. } => top <= row && row <= bottom,
        }
    }

    /// Returns `true` if the given column index lies inside the window.
    #[must_use]
    pub const fn contains_column(&self, column: usize) -> bool {
        match *self {
            Self::Empty => false,
            Self::Window {
                front_column,
                end_column,
                ..
            } => front_column <= column && column <= end_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GridRange;

    #[test]
    fn window_normalizes_inverted_bounds() {
        assert_eq!(GridRange::window(3, 2, 0, 0), GridRange::Empty);
        assert_eq!(GridRange::window(0, 0, 2, 1), GridRange::Empty);
        assert!(!GridRange::window(0, 0, 0, 0).is_empty());
    }

    #[test]
    fn counts_and_membership() {
        let range = GridRange::window(2, 6, 1, 3);
        assert_eq!(range.row_count(), 5);
        assert_eq!(range.column_count(), 3);
        assert_eq!(range.cell_count(), 15);
        assert!(range.contains_row(2));
        assert!(range.contains_row(6));
        assert!(!range.contains_row(7));
        assert!(range.contains_column(3));
        assert!(!range.contains_column(0));

        assert_eq!(GridRange::Empty.cell_count(), 0);
        assert!(!GridRange::Empty.contains_row(0));
    }

    #[test]
    fn rows_and_columns_iterate_inclusively() {
        let range = GridRange::window(1, 3, 0, 1);
        assert!(range.rows().unwrap().eq(1..=3));
        assert!(range.columns().unwrap().eq(0..=1));
        assert!(GridRange::Empty.rows().is_none());
        assert!(GridRange::Empty.columns().is_none());
    }
}
