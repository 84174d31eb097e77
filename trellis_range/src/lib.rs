// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Range: the visible-window primitives for virtualized grids.
//!
//! This crate provides the value type and pure math at the bottom of the
//! Trellis grid renderer:
//!
//! - [`GridRange`]: an immutable rectangular window of (row, column) indices,
//!   or an explicit empty marker.
//! - [`RangeInputs`] and [`compute_range`]: a deterministic mapping from
//!   scroll position, viewport size, row geometry, and per-column widths to
//!   the [`GridRange`] that should currently be realized.
//!
//! It deliberately knows nothing about elements, stylesheets, data sources,
//! or scheduling. Host layers are responsible for:
//!
//! - Measuring the viewport and tracking the scroll offset.
//! - Calling [`compute_range`] whenever one of its inputs may have changed.
//! - Diffing consecutive ranges to decide which cells to realize.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_range::{GridRange, RangeInputs, compute_range};
//!
//! let inputs = RangeInputs {
//!     scroll_top: 45.0,
//!     scroll_front: 0.0,
//!     viewport_height: 100.0,
//!     viewport_client_width: 120.0,
//!     row_height: 20.0,
//!     row_border_width: 1.0,
//!     row_count: 50,
//! };
//!
//! // Three 50px columns; the third one's trailing edge reaches the
//! // 120px viewport bound, so the window ends at column 1.
//! let range = compute_range(&inputs, [50.0, 50.0, 50.0]);
//! assert_eq!(
//!     range,
//!     GridRange::window(2, 6, 0, 1),
//! );
//! ```
//!
//! All offsets and extents live in one caller-chosen coordinate space
//! (typically logical pixels) and are expected to be finite and non-negative.
//! The *front* axis is the writing-direction-aware leading edge: left in
//! left-to-right layout, right in right-to-left layout. This crate only sees
//! offsets along that axis and never needs to know which concrete side it is.
//!
//! This crate is `no_std` and allocation-free.

#![no_std]

mod calculator;
mod range;

pub use calculator::{RangeInputs, compute_range};
pub use range::GridRange;
