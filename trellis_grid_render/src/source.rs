// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-source contracts for rows and columns.
//!
//! The renderer reads rows and columns through these traits and never
//! mutates data. Row and column *identifiers* are stable across data
//! mutations; *indices* can shift. The paint-state cache is keyed by
//! identifier for exactly that reason.

use std::fmt;
use std::rc::Rc;

use crate::host::GridHost;
use crate::render::{CellRenderer, HeaderRenderer};

/// Width used when a column definition carries no usable width.
pub const DEFAULT_COLUMN_WIDTH: f64 = 50.0;

/// A stable row identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub String);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A stable column identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub String);

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Field access on a single row.
pub trait RowData {
    /// The cell value for the named field, if present.
    fn field(&self, name: &str) -> Option<&str>;
}

/// The row data source contract.
pub trait RowSource {
    /// The row type handed to cell renderers.
    type Row: RowData;

    /// Total number of rows.
    fn row_count(&self) -> usize;

    /// The row at `index`, or `None` if it vanished between range
    /// computation and paint (not an error; the paint worker skips it).
    fn row_by_index(&self, index: usize) -> Option<&Self::Row>;

    /// The stable identifier of the row at `index`.
    fn row_id_by_index(&self, index: usize) -> Option<RowId>;
}

/// A column definition.
///
/// Renderers are resolved once per paint record — at record creation a
/// column's configured renderer (or the text default) is captured into the
/// record and reused for the record's lifetime.
pub struct ColumnSpec<H: GridHost + ?Sized> {
    /// Column width in logical pixels. Non-finite or negative widths fall
    /// back to [`DEFAULT_COLUMN_WIDTH`].
    pub width: f64,
    /// The row field this column displays.
    pub field: String,
    /// Data handed to the header renderer (typically the column title).
    pub header_data: Option<String>,
    /// Custom header renderer, if any.
    pub header_renderer: Option<Rc<dyn HeaderRenderer<H>>>,
    /// Custom cell renderer, if any.
    pub cell_renderer: Option<Rc<dyn CellRenderer<H>>>,
}

impl<H: GridHost + ?Sized> fmt::Debug for ColumnSpec<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("width", &self.width)
            .field("field", &self.field)
            .field("header_data", &self.header_data)
            .field("has_header_renderer", &self.header_renderer.is_some())
            .field("has_cell_renderer", &self.cell_renderer.is_some())
            .finish()
    }
}

impl<H: GridHost + ?Sized> ColumnSpec<H> {
    /// Creates a spec with the given width and field, no header data and
    /// default renderers.
    #[must_use]
    pub fn new(width: f64, field: impl Into<String>) -> Self {
        Self {
            width,
            field: field.into(),
            header_data: None,
            header_renderer: None,
            cell_renderer: None,
        }
    }

    /// The width used for layout, with the malformed-width fallback applied.
    #[must_use]
    pub fn effective_width(&self) -> f64 {
        if self.width.is_finite() && self.width >= 0.0 {
            self.width
        } else {
            DEFAULT_COLUMN_WIDTH
        }
    }
}

/// The column data source contract.
pub trait ColumnSource<H: GridHost + ?Sized> {
    /// The currently visible column ids, in display order.
    fn visible_column_ids(&self) -> &[ColumnId];

    /// The definition for a column id.
    fn column_by_id(&self, id: &ColumnId) -> Option<&ColumnSpec<H>>;

    /// The id of the visible column at `index`.
    fn column_id_by_index(&self, index: usize) -> Option<&ColumnId> {
        self.visible_column_ids().get(index)
    }
}
