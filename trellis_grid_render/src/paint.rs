// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared paint context and the two incremental paint passes.
//!
//! [`GridCx`] owns everything the update graph and the paint workers touch:
//! the host, the data sources, the theme, the paint-state cache, and the
//! committed range. Workers and update nodes are closures over `&mut GridCx`,
//! so nothing here is shared or re-entrant.
//!
//! Both passes are incremental against the cache: a record that already
//! exists is never recreated, a record already painted is never repainted.
//! The header pass handles every in-range column in one invocation; the body
//! pass returns after the first row that needed any work, which is the
//! bounded unit the scheduler interleaves.

use std::rc::Rc;

use hashbrown::HashMap;
use kurbo::Size;
use smallvec::SmallVec;
use trellis_range::GridRange;
use trellis_update::DebouncedEmitter;

use crate::direction::Direction;
use crate::error::RenderError;
use crate::host::{
    ElementKind, GridHost, GridSurfaces, RowParity, ScrollCoordinate, SplitterEdge,
    ViewportMetrics,
};
use crate::records::{CellRecord, HeaderCellRecord, PaintCache, PaintState, RowRecord};
use crate::render::{
    CellPaint, CellRenderer, HeaderPaint, HeaderRenderer, TextCellRenderer, TextHeaderRenderer,
};
use crate::source::{ColumnSource, ColumnSpec, RowData, RowSource};
use crate::theme::Theme;

/// Everything the update graph and the paint workers operate on.
///
/// Fields are accessed directly (not through accessors) so that workers can
/// hold disjoint borrows: the host mutably, the sources and theme immutably,
/// within one pass.
pub struct GridCx<H, R, C>
where
    H: GridHost,
    R: RowSource,
    C: ColumnSource<H>,
{
    /// The host that owns the concrete visual tree.
    pub host: H,
    /// The row data source.
    pub rows: R,
    /// The column data source.
    pub columns: C,
    /// The active theme.
    pub theme: Box<dyn Theme>,
    /// The widget's writing direction.
    pub direction: Direction,
    /// CSS class scoping every derived rule to this widget instance.
    pub root_class: String,
    /// Outer size of the widget, as last reported by the host.
    pub widget_size: Size,
    /// The mounted paint surfaces.
    pub surfaces: GridSurfaces<H::Element>,
    /// Handle to the injected layout rule set.
    pub layout_sheet: H::Stylesheet,
    /// Handle to the injected cell rule set.
    pub cell_sheet: H::Stylesheet,
    /// The paint-state cache.
    pub cache: PaintCache<H>,
    /// The committed visible range the workers paint against.
    pub range: GridRange,
    /// Viewport measurements taken at the start of the current cycle.
    pub metrics: Option<ViewportMetrics>,
    /// The current scroll offset in front/top coordinates.
    pub scroll: ScrollCoordinate,
    /// Debounced range-changed emitter.
    pub emitter: DebouncedEmitter,
    /// The host's monotonic clock, updated on every frame.
    pub clock_ms: f64,
    /// First error raised inside a worker or compute closure this cycle.
    /// Checked and propagated by the controller after pulls and turns.
    pub failure: Option<RenderError>,
    default_header_renderer: Rc<dyn HeaderRenderer<H>>,
    default_cell_renderer: Rc<dyn CellRenderer<H>>,
}

impl<H, R, C> std::fmt::Debug for GridCx<H, R, C>
where
    H: GridHost,
    R: RowSource,
    C: ColumnSource<H>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCx")
            .field("root_class", &self.root_class)
            .field("range", &self.range)
            .field("cache", &self.cache)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

impl<H, R, C> GridCx<H, R, C>
where
    H: GridHost,
    R: RowSource,
    C: ColumnSource<H>,
{
    /// Mounts the widget structure on `host` and builds the context.
    ///
    /// Creates the two (initially empty) injected rule sets and starts with
    /// an empty range and cache.
    pub fn new(
        mut host: H,
        rows: R,
        columns: C,
        theme: Box<dyn Theme>,
        direction: Direction,
        root_class: impl Into<String>,
    ) -> Self {
        let root_class = root_class.into();
        let surfaces = host.mount_surfaces();
        let layout_sheet = host.create_stylesheet(&format!("{root_class}-layout"));
        let cell_sheet = host.create_stylesheet(&format!("{root_class}-cell"));
        Self {
            host,
            rows,
            columns,
            theme,
            direction,
            root_class,
            widget_size: Size::ZERO,
            surfaces,
            layout_sheet,
            cell_sheet,
            cache: PaintCache::new(),
            range: GridRange::Empty,
            metrics: None,
            scroll: ScrollCoordinate::default(),
            emitter: DebouncedEmitter::new(),
            clock_ms: 0.0,
            failure: None,
            default_header_renderer: Rc::new(TextHeaderRenderer),
            default_cell_renderer: Rc::new(TextCellRenderer),
        }
    }

    /// Records the first failure of the current cycle and flattens a worker
    /// result to the scheduler's "did work" convention.
    pub(crate) fn guard(&mut self, result: Result<bool, RenderError>) -> bool {
        match result {
            Ok(worked) => worked,
            Err(err) => {
                if self.failure.is_none() {
                    self.failure = Some(err);
                }
                false
            }
        }
    }

    /// Like [`GridCx::guard`], for value-producing compute closures.
    /// Records the failure and yields `None` so the node commits a neutral
    /// value; the controller propagates the stored error right after the
    /// pull.
    pub(crate) fn guard_value<T>(&mut self, result: Result<T, RenderError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                if self.failure.is_none() {
                    self.failure = Some(err);
                }
                None
            }
        }
    }

    /// Effective widths of the visible columns, in display order.
    pub fn column_widths(&self) -> Result<Vec<f64>, RenderError> {
        self.columns
            .visible_column_ids()
            .iter()
            .map(|id| {
                self.columns
                    .column_by_id(id)
                    .map(ColumnSpec::effective_width)
                    .ok_or_else(|| RenderError::UnknownColumn(id.clone()))
            })
            .collect()
    }

    /// Takes the cycle's failure, if a worker or compute raised one.
    pub(crate) fn take_failure(&mut self) -> Result<(), RenderError> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Header paint pass: ensures records and paint for every in-range
    /// column. Returns `true` if any record was created or painted.
    ///
    /// Creation is two-phase so insertion cost is paid once: all missing
    /// header cells are built detached, then appended to the header canvas
    /// in a single batch.
    pub fn render_header_cells(&mut self) -> Result<bool, RenderError> {
        let Some(columns) = self.range.columns() else {
            return Ok(false);
        };
        let mut worked = false;

        let mut appended: SmallVec<[H::Element; 8]> = SmallVec::new();
        for index in columns.clone() {
            let id = self
                .columns
                .column_id_by_index(index)
                .ok_or(RenderError::UnknownColumnIndex(index))?
                .clone();
            if self.cache.headers.contains_key(&id) {
                continue;
            }
            let spec = self
                .columns
                .column_by_id(&id)
                .ok_or_else(|| RenderError::UnknownColumn(id.clone()))?;
            let renderer = spec
                .header_renderer
                .clone()
                .unwrap_or_else(|| self.default_header_renderer.clone());

            let element = self.host.create_element(ElementKind::HeaderCell { column: &id });
            let content = self
                .host
                .create_element(ElementKind::HeaderCellContent { column: &id });
            let border = self
                .host
                .create_element(ElementKind::HeaderCellBorder { column: &id });
            let splitter_front = self.host.create_element(ElementKind::HeaderCellSplitter {
                edge: SplitterEdge::Front,
            });
            let splitter_end = self.host.create_element(ElementKind::HeaderCellSplitter {
                edge: SplitterEdge::End,
            });
            self.host.append_children(
                &element,
                &[content.clone(), border, splitter_front, splitter_end],
            );

            appended.push(element.clone());
            self.cache.headers.insert(
                id,
                HeaderCellRecord {
                    state: PaintState::Initial,
                    element,
                    content,
                    renderer,
                },
            );
            worked = true;
        }
        if !appended.is_empty() {
            let canvas = self.surfaces.header_canvas.clone();
            self.host.append_children(&canvas, &appended);
            tracing::trace!(count = appended.len(), "appended header cells");
        }

        for index in columns {
            let id = self
                .columns
                .column_id_by_index(index)
                .ok_or(RenderError::UnknownColumnIndex(index))?
                .clone();
            let Some(record) = self.cache.headers.get(&id) else {
                continue;
            };
            if record.state == PaintState::Painted {
                continue;
            }
            let renderer = record.renderer.clone();
            let content = record.content.clone();
            let spec = self
                .columns
                .column_by_id(&id)
                .ok_or_else(|| RenderError::UnknownColumn(id.clone()))?;

            renderer.render(
                &mut self.host,
                HeaderPaint {
                    column_id: &id,
                    column: spec,
                    element: &content,
                    data: spec.header_data.as_deref(),
                    right_to_left: self.direction.is_rtl(),
                    theme: self.theme.as_ref(),
                },
            );
            if let Some(record) = self.cache.headers.get_mut(&id) {
                record.state = PaintState::Painted;
            }
            worked = true;
        }

        Ok(worked)
    }

    /// Body paint pass: one bounded unit of work.
    ///
    /// Walks the in-range rows top to bottom and returns `true` after the
    /// first row that needed any work (row chrome created, cells created, or
    /// cell content painted); the scheduler's next turn resumes with the
    /// following rows. A row whose data or id vanished since the range was
    /// computed is skipped without error. Returns `false` once every
    /// in-range row is fully painted.
    pub fn render_body_cells(&mut self) -> Result<bool, RenderError> {
        let (Some(rows), Some(columns)) = (self.range.rows(), self.range.columns()) else {
            return Ok(false);
        };
        let last_data_row = self.rows.row_count().saturating_sub(1);

        for row_index in rows {
            let Some(row_id) = self.rows.row_id_by_index(row_index) else {
                continue;
            };
            // A row whose data vanished since the range was computed is
            // skipped whether or not it already has a record.
            if self.rows.row_by_index(row_index).is_none() {
                continue;
            }
            let mut worked = false;

            if !self.cache.rows.contains_key(&row_id) {
                let parity = RowParity::from_index(row_index);
                let element = self.host.create_element(ElementKind::Row {
                    row: &row_id,
                    parity,
                });
                // The last data row draws no trailing border.
                if row_index != last_data_row {
                    let border = self.host.create_element(ElementKind::RowBorder);
                    self.host
                        .append_children(&element, std::slice::from_ref(&border));
                }
                let canvas = self.surfaces.content_canvas.clone();
                self.host
                    .append_children(&canvas, std::slice::from_ref(&element));
                self.cache.rows.insert(
                    row_id.clone(),
                    RowRecord {
                        state: PaintState::Painted,
                        element,
                        cells: HashMap::new(),
                    },
                );
                worked = true;
            }

            let mut new_cells: SmallVec<[_; 8]> = SmallVec::new();
            let mut appended: SmallVec<[H::Element; 8]> = SmallVec::new();
            for column_index in columns.clone() {
                let id = self
                    .columns
                    .column_id_by_index(column_index)
                    .ok_or(RenderError::UnknownColumnIndex(column_index))?
                    .clone();
                let exists = self
                    .cache
                    .rows
                    .get(&row_id)
                    .is_some_and(|record| record.cells.contains_key(&id));
                if exists {
                    continue;
                }
                let spec = self
                    .columns
                    .column_by_id(&id)
                    .ok_or_else(|| RenderError::UnknownColumn(id.clone()))?;
                let renderer = spec
                    .cell_renderer
                    .clone()
                    .unwrap_or_else(|| self.default_cell_renderer.clone());

                let element = self.host.create_element(ElementKind::Cell {
                    row: &row_id,
                    column: &id,
                });
                let content = self.host.create_element(ElementKind::CellContent { column: &id });
                self.host
                    .append_children(&element, std::slice::from_ref(&content));
                appended.push(element.clone());
                new_cells.push((
                    id,
                    CellRecord {
                        state: PaintState::Initial,
                        element,
                        content,
                        renderer,
                    },
                ));
            }
            if let Some(record) = self.cache.rows.get_mut(&row_id) {
                if !appended.is_empty() {
                    let parent = record.element.clone();
                    self.host.append_children(&parent, &appended);
                    worked = true;
                }
                for (id, cell) in new_cells {
                    record.cells.insert(id, cell);
                }
            }

            let row_data = self.rows.row_by_index(row_index);
            for column_index in columns.clone() {
                let id = self
                    .columns
                    .column_id_by_index(column_index)
                    .ok_or(RenderError::UnknownColumnIndex(column_index))?
                    .clone();
                let Some(cell) = self
                    .cache
                    .rows
                    .get(&row_id)
                    .and_then(|record| record.cells.get(&id))
                else {
                    continue;
                };
                if cell.state == PaintState::Painted {
                    continue;
                }
                let renderer = cell.renderer.clone();
                let content = cell.content.clone();
                let spec = self
                    .columns
                    .column_by_id(&id)
                    .ok_or_else(|| RenderError::UnknownColumn(id.clone()))?;
                let cell_data = row_data.and_then(|row| row.field(&spec.field));

                renderer.render(
                    &mut self.host,
                    CellPaint {
                        column_id: &id,
                        column: spec,
                        element: &content,
                        cell_data,
                        right_to_left: self.direction.is_rtl(),
                        theme: self.theme.as_ref(),
                    },
                );
                if let Some(cell) = self
                    .cache
                    .rows
                    .get_mut(&row_id)
                    .and_then(|record| record.cells.get_mut(&id))
                {
                    cell.state = PaintState::Painted;
                }
                worked = true;
            }

            if worked {
                tracing::trace!(row = %row_id, "painted row");
                return Ok(true);
            }
        }

        Ok(false)
    }
}
