// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable header/cell content renderers.
//!
//! The rendering core decides *which* cells to paint and *when*; what a cell
//! displays is delegated to these capability interfaces. A column may
//! configure its own renderer; otherwise the text defaults are used. The
//! choice is resolved once when a paint record is created, never per paint.
//!
//! Renderers must paint synchronously into the given element and return
//! nothing; by the time they run, the element has been inserted into the
//! paint surface, so they may read inserted-layout measurements from the
//! host if they need to.

use crate::host::GridHost;
use crate::source::{ColumnId, ColumnSpec};
use crate::theme::Theme;

/// Everything a header renderer gets to paint one header cell.
pub struct HeaderPaint<'a, H: GridHost + ?Sized> {
    /// The column's stable identifier.
    pub column_id: &'a ColumnId,
    /// The column definition.
    pub column: &'a ColumnSpec<H>,
    /// The content element to paint into; already inserted.
    pub element: &'a H::Element,
    /// The column's header data (typically the title).
    pub data: Option<&'a str>,
    /// `true` under right-to-left layout.
    pub right_to_left: bool,
    /// The active theme.
    pub theme: &'a dyn Theme,
}

impl<H: GridHost + ?Sized> std::fmt::Debug for HeaderPaint<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderPaint")
            .field("column_id", &self.column_id)
            .field("data", &self.data)
            .field("right_to_left", &self.right_to_left)
            .finish_non_exhaustive()
    }
}

/// Everything a cell renderer gets to paint one body cell.
pub struct CellPaint<'a, H: GridHost + ?Sized> {
    /// The column's stable identifier.
    pub column_id: &'a ColumnId,
    /// The column definition.
    pub column: &'a ColumnSpec<H>,
    /// The content element to paint into; already inserted.
    pub element: &'a H::Element,
    /// The row's value for the column's field.
    pub cell_data: Option<&'a str>,
    /// `true` under right-to-left layout.
    pub right_to_left: bool,
    /// The active theme.
    pub theme: &'a dyn Theme,
}

impl<H: GridHost + ?Sized> std::fmt::Debug for CellPaint<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellPaint")
            .field("column_id", &self.column_id)
            .field("cell_data", &self.cell_data)
            .field("right_to_left", &self.right_to_left)
            .finish_non_exhaustive()
    }
}

/// Paints a column's header content.
pub trait HeaderRenderer<H: GridHost + ?Sized> {
    /// Paints into `paint.element`, synchronously.
    fn render(&self, host: &mut H, paint: HeaderPaint<'_, H>);
}

/// Paints one cell's content.
pub trait CellRenderer<H: GridHost + ?Sized> {
    /// Paints into `paint.element`, synchronously.
    fn render(&self, host: &mut H, paint: CellPaint<'_, H>);
}

/// Default header renderer: the header data as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHeaderRenderer;

impl<H: GridHost + ?Sized> HeaderRenderer<H> for TextHeaderRenderer {
    fn render(&self, host: &mut H, paint: HeaderPaint<'_, H>) {
        host.set_text(paint.element, paint.data.unwrap_or(""));
    }
}

/// Default cell renderer: the field value as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCellRenderer;

impl<H: GridHost + ?Sized> CellRenderer<H> for TextCellRenderer {
    fn render(&self, host: &mut H, paint: CellPaint<'_, H>) {
        host.set_text(paint.element, paint.cell_data.unwrap_or(""));
    }
}
