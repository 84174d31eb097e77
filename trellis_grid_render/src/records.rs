// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint-state cache: per-column header records and per-row/per-cell
//! body records.
//!
//! Records are keyed by stable identifiers and are **never evicted** within
//! a widget instance's lifetime: a row or column that scrolls out of view
//! keeps its elements so that scrolling back is paint-free. This is a
//! deliberate memory/compute trade-off favoring re-scroll performance over
//! footprint; with very large datasets and a long distinct-scroll history
//! the cache grows without bound.

use std::rc::Rc;

use hashbrown::HashMap;

use crate::host::GridHost;
use crate::render::{CellRenderer, HeaderRenderer};
use crate::source::{ColumnId, RowId};

/// Paint progress of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintState {
    /// Elements exist but the content renderer has not run yet.
    Initial,
    /// The content renderer has run; the record is complete.
    Painted,
}

/// Per-column header record.
pub struct HeaderCellRecord<H: GridHost + ?Sized> {
    /// Paint progress.
    pub state: PaintState,
    /// The header cell element, owned by this record.
    pub element: H::Element,
    /// The content child the header renderer paints into.
    pub content: H::Element,
    /// The renderer resolved at record creation.
    pub renderer: Rc<dyn HeaderRenderer<H>>,
}

impl<H: GridHost + ?Sized> std::fmt::Debug for HeaderCellRecord<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderCellRecord")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Per-cell body record.
pub struct CellRecord<H: GridHost + ?Sized> {
    /// Paint progress.
    pub state: PaintState,
    /// The cell element, owned by this record.
    pub element: H::Element,
    /// The content child the cell renderer paints into.
    pub content: H::Element,
    /// The renderer resolved at record creation.
    pub renderer: Rc<dyn CellRenderer<H>>,
}

impl<H: GridHost + ?Sized> std::fmt::Debug for CellRecord<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellRecord")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Per-row body record.
pub struct RowRecord<H: GridHost + ?Sized> {
    /// Paint progress of the row chrome itself.
    pub state: PaintState,
    /// The row element, owned by this record.
    pub element: H::Element,
    /// Cell records by column identifier.
    pub cells: HashMap<ColumnId, CellRecord<H>>,
}

impl<H: GridHost + ?Sized> std::fmt::Debug for RowRecord<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowRecord")
            .field("state", &self.state)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

/// The whole paint-state cache.
///
/// Single-writer: only the paint workers mutate it, on the one UI-owning
/// thread, and only ever for rows/columns inside the current range.
pub struct PaintCache<H: GridHost + ?Sized> {
    /// Header records by column identifier.
    pub headers: HashMap<ColumnId, HeaderCellRecord<H>>,
    /// Row records by row identifier.
    pub rows: HashMap<RowId, RowRecord<H>>,
}

impl<H: GridHost + ?Sized> std::fmt::Debug for PaintCache<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintCache")
            .field("headers", &self.headers.len())
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

impl<H: GridHost + ?Sized> Default for PaintCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: GridHost + ?Sized> PaintCache<H> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            rows: HashMap::new(),
        }
    }

    /// Total number of cell records across all rows.
    #[must_use]
    pub fn cell_record_count(&self) -> usize {
        self.rows.values().map(|row| row.cells.len()).sum()
    }
}
