// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure mapping from scroll/viewport/geometry inputs to a [`GridRange`].

use crate::GridRange;

/// Scalar inputs to [`compute_range`].
///
/// All offsets and extents are in the same coordinate space (typically
/// logical pixels) and are expected to be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeInputs {
    /// Scroll offset along the vertical axis.
    pub scroll_top: f64,
    /// Scroll offset along the front (leading) axis.
    pub scroll_front: f64,
    /// Height of the scrollable viewport.
    pub viewport_height: f64,
    /// Client width of the scrollable viewport (excludes scrollbars).
    pub viewport_client_width: f64,
    /// Uniform row height.
    pub row_height: f64,
    /// Width of the horizontal border drawn between rows.
    pub row_border_width: f64,
    /// Total number of data rows.
    pub row_count: usize,
}

/// Computes the visible (row, column) window.
///
/// - The row window is `floor` division of the top and bottom viewport edges
///   by the row pitch (`row_height + row_border_width`), clamped into
///   `0..row_count`.
/// - The column window walks `column_widths` in display order accumulating
///   width. A column whose front (leading) edge is at or before
///   `scroll_front` is the front candidate, last such column winning; a
///   column whose trailing edge stays short of `scroll_front +
///   viewport_client_width` extends the end candidate, and the walk stops at
///   the first column whose trailing edge reaches that bound. If the
///   accumulated width never reaches the bound (grid narrower than the
///   viewport), the end column defaults to the last visible column.
///
/// Returns [`GridRange::Empty`] when there are no rows, no columns, or the
/// row pitch is not positive (the viewport cannot be subdivided).
///
/// The function is pure: no side effects, deterministic given its inputs.
#[must_use]
pub fn compute_range(
    inputs: &RangeInputs,
    column_widths: impl IntoIterator<Item = f64>,
) -> GridRange {
    let pitch = inputs.row_height + inputs.row_border_width;
    if inputs.row_count == 0 || !pitch.is_finite() || pitch <= 0.0 {
        return GridRange::Empty;
    }

    let top = floor_to_index(inputs.scroll_top.max(0.0) / pitch);
    let bottom = floor_to_index((inputs.scroll_top.max(0.0) + inputs.viewport_height) / pitch)
        .min(inputs.row_count - 1);

    let scroll_front = inputs.scroll_front.max(0.0);
    let bound = scroll_front + inputs.viewport_client_width.max(0.0);

    let mut column_count = 0_usize;
    let mut front_column = 0_usize;
    let mut end_column = None;
    let mut reached_bound = false;
    let mut lead = 0.0_f64;

    for (index, width) in column_widths.into_iter().enumerate() {
        column_count = index + 1;
        let trail = lead + width.max(0.0);

        if lead <= scroll_front {
            front_column = index;
        }

        if trail < bound {
            end_column = Some(index);
        } else {
            reached_bound = true;
            break;
        }

        lead = trail;
    }

    if column_count == 0 {
        return GridRange::Empty;
    }

    // Grid narrower than the viewport: realize through the last column.
    let end_column = if reached_bound {
        end_column.unwrap_or(column_count - 1)
    } else {
        column_count - 1
    };

    GridRange::window(top, bottom, front_column, end_column)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Input is clamped non-negative first; the cast truncates toward zero, which is floor for non-negative values"
)]
fn floor_to_index(value: f64) -> usize {
    value.max(0.0) as usize
}
