// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Grid Render: an incremental, host-agnostic grid renderer.
//!
//! The renderer virtualizes a scrollable grid: it derives the visible
//! (row, column) window from scroll and geometry, realizes only the cells
//! inside it, and spreads paint work across host frames through a
//! cooperative scheduler. It owns no visual tree of its own — a host
//! implements [`GridHost`] (element construction, batched insertion,
//! stylesheet injection, viewport measurement) and the renderer manipulates
//! opaque element handles.
//!
//! The moving parts:
//!
//! - [`GridRender`] — the controller. Takes invalidation notifications and
//!   scroll offsets, re-derives the two injected stylesheets and the visible
//!   range through a memoized update graph, and paints incrementally from
//!   the host's frame callback.
//! - [`GridHost`], [`RowSource`], [`ColumnSource`], [`Theme`] — the
//!   contracts a host supplies.
//! - [`HeaderRenderer`] / [`CellRenderer`] — pluggable per-column content
//!   painters, with plain-text defaults.
//!
//! Painted cells are cached by stable row/column identifier and never
//! evicted, so scrolling back over previously visited data is paint-free.
//!
//! ```rust,ignore
//! let mut grid = GridRender::new(host, rows, columns, theme,
//!     Direction::Ltr, "my-grid")?;
//! grid.notify_resized(Size::new(640.0, 480.0), now_ms)?;
//! // From the host's frame callback:
//! let report = grid.on_frame(now_ms)?;
//! if report.range_changed {
//!     // React to the (debounced) new visible range.
//! }
//! ```

mod controller;
mod direction;
mod error;
mod host;
mod paint;
mod records;
mod render;
mod source;
mod stylesheet;
mod theme;

pub use controller::{FrameReport, GridRender, Invalidation};
pub use trellis_range::GridRange;
pub use direction::Direction;
pub use error::RenderError;
pub use host::{
    ElementKind, GridHost, GridSurfaces, RowParity, ScrollCoordinate, SplitterEdge,
    ViewportMetrics,
};
pub use paint::GridCx;
pub use records::{CellRecord, HeaderCellRecord, PaintCache, PaintState, RowRecord};
pub use render::{
    CellPaint, CellRenderer, HeaderPaint, HeaderRenderer, TextCellRenderer, TextHeaderRenderer,
};
pub use source::{
    ColumnId, ColumnSource, ColumnSpec, DEFAULT_COLUMN_WIDTH, RowData, RowId, RowSource,
};
pub use stylesheet::{
    CanvasRect, CssBuilder, cell_stylesheet, compute_canvas_rect, layout_stylesheet,
};
pub use theme::{
    BorderStyle, DirectionalPadding, MapTheme, Theme, Token, TokenValue, border, metric, padding,
    text,
};
