// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host contract: element construction, insertion, stylesheets, and
//! viewport measurement.
//!
//! Trellis is headless. A host (a browser DOM layer, a retained scene graph,
//! a test double) implements [`GridHost`] and owns the concrete visual tree;
//! the renderer only ever manipulates opaque element handles. The element
//! vocabulary is fixed: each [`ElementKind`] corresponds to one structural
//! CSS class that the derived stylesheets target (for example
//! `trellis-header-cell`, `trellis-row`, `trellis-cell-content`, with a
//! `-{column_id}` suffix on the per-column variants).

use kurbo::Size;

use crate::source::{ColumnId, RowId};

/// Alternating-parity class for body rows, derived from the row index's low
/// bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowParity {
    /// Row index with low bit 0.
    Even,
    /// Row index with low bit 1.
    Odd,
}

impl RowParity {
    /// Parity of the given row index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        if index & 1 == 1 { Self::Odd } else { Self::Even }
    }
}

/// Which edge of a header cell a splitter handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterEdge {
    /// The leading edge.
    Front,
    /// The trailing edge.
    End,
}

/// The structural role of an element the renderer asks the host to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind<'a> {
    /// A header cell for a column.
    HeaderCell {
        /// The column this cell belongs to.
        column: &'a ColumnId,
    },
    /// The content child of a header cell; header renderers paint into it.
    HeaderCellContent {
        /// The column this cell belongs to.
        column: &'a ColumnId,
    },
    /// The vertical border child of a header cell.
    HeaderCellBorder {
        /// The column this cell belongs to.
        column: &'a ColumnId,
    },
    /// A drag-handle child on one edge of a header cell; the hook a host
    /// wires column resizing to.
    HeaderCellSplitter {
        /// The edge the handle sits on.
        edge: SplitterEdge,
    },
    /// A body row.
    Row {
        /// The row's stable identifier.
        row: &'a RowId,
        /// Alternating-parity class.
        parity: RowParity,
    },
    /// The horizontal border child of a row (omitted on the last data row).
    RowBorder,
    /// A body cell.
    Cell {
        /// The row's stable identifier.
        row: &'a RowId,
        /// The column this cell belongs to.
        column: &'a ColumnId,
    },
    /// The content child of a body cell; cell renderers paint into it.
    CellContent {
        /// The column this cell belongs to.
        column: &'a ColumnId,
    },
}

/// The retained canvases the paint workers insert into.
#[derive(Debug, Clone)]
pub struct GridSurfaces<E> {
    /// The header paint surface; header cells are appended here.
    pub header_canvas: E,
    /// The body paint surface; rows are appended here.
    pub content_canvas: E,
}

/// One synchronous snapshot of the viewport's measured geometry.
///
/// Recomputed before every update-graph pull so a range computation never
/// mixes fresh scroll state with stale measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Outer size of the scrollable viewport.
    pub outer: Size,
    /// Client size of the viewport (excludes scrollbars).
    pub client: Size,
    /// Size of the scrollable content canvas.
    pub canvas: Size,
}

/// The widget's scroll offset in direction-aware coordinates.
///
/// `front` is the offset along the leading axis (left in left-to-right
/// layout, right in right-to-left layout); `top` is the vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollCoordinate {
    /// Offset along the front (leading) axis.
    pub front: f64,
    /// Offset along the vertical axis.
    pub top: f64,
}

/// The element-construction and measurement contract a host implements.
///
/// All methods are synchronous and run on the single UI-owning thread.
pub trait GridHost {
    /// Opaque handle to a retained element. Cloning a handle clones the
    /// reference, not the element.
    type Element: Clone;
    /// Opaque handle to an injected, widget-scoped style rule set.
    type Stylesheet;

    /// Builds the widget's fixed structure and returns the paint surfaces.
    fn mount_surfaces(&mut self) -> GridSurfaces<Self::Element>;

    /// Creates an empty, detached style rule set scoped to this widget.
    fn create_stylesheet(&mut self, name: &str) -> Self::Stylesheet;

    /// Replaces the full text of an injected style rule set.
    fn replace_stylesheet(&mut self, sheet: &Self::Stylesheet, css: &str);

    /// Measures the viewport, or `None` while measurement is unavailable
    /// (for example before the widget is attached).
    fn viewport_metrics(&self) -> Option<ViewportMetrics>;

    /// Creates a detached element of the given structural kind.
    fn create_element(&mut self, kind: ElementKind<'_>) -> Self::Element;

    /// Appends `children` to `parent` in order, as one batched insertion.
    fn append_children(&mut self, parent: &Self::Element, children: &[Self::Element]);

    /// Replaces the text content of an element.
    fn set_text(&mut self, element: &Self::Element, text: &str);
}

/// A host that creates nothing; used by unit tests of types generic over a
/// host.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct NullHost;

#[cfg(test)]
impl GridHost for NullHost {
    type Element = ();
    type Stylesheet = ();

    fn mount_surfaces(&mut self) -> GridSurfaces<()> {
        GridSurfaces {
            header_canvas: (),
            content_canvas: (),
        }
    }

    fn create_stylesheet(&mut self, _name: &str) {}

    fn replace_stylesheet(&mut self, _sheet: &(), _css: &str) {}

    fn viewport_metrics(&self) -> Option<ViewportMetrics> {
        None
    }

    fn create_element(&mut self, _kind: ElementKind<'_>) {}

    fn append_children(&mut self, _parent: &(), _children: &[()]) {}

    fn set_text(&mut self, _element: &(), _text: &str) {}
}
